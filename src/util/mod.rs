pub use self::args::{Args, DESCRIPTION};

mod args;
