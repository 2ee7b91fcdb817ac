pub mod stop;
pub mod stress;
