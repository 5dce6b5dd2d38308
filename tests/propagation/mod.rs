mod atmosphere;
mod reentry;
mod sweep;
