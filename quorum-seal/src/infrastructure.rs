//! Infrastructure shared by the server and the command-line tool.

pub mod logging;
