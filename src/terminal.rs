mod line_writer;
mod prompt;

pub use line_writer::{LineWriter, StdoutLineWriter};
pub use prompt::{DialoguerPrompter, Prompter};

#[cfg(test)]
pub use line_writer::VecLineWriter;
#[cfg(test)]
pub use prompt::ScriptedPrompter;
