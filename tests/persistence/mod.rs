mod scenario;
mod trace;
