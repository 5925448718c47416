pub mod config_cmd;
pub mod list_chained;
pub mod login;
pub mod switch;
pub mod whoami;
