mod compiler;

#[cfg(test)]
mod tests;

pub use compiler::*;
