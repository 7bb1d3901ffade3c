pub mod interactive;
pub mod time_value;
