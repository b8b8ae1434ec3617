use std::fs;
use std::io;
use std::path::Path;

/// A ROM image, ready for loading into the [Processor](crate::Processor).
#[derive(Default)]
pub struct Program {
    /// The raw bytes as read from the ROM.
    program_data: Vec<u8>,
}

impl Program {
    /// Constructor that returns a [Program] instance representing the passed program data.
    pub fn new(data: Vec<u8>) -> Self {
        Program { program_data: data }
    }

    /// Reads a raw ROM image from disk.
    ///
    /// # Arguments
    ///
    /// * `path` - location of the ROM file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Program::new(fs::read(path)?))
    }

    /// Returns a reference to the program data held in this instance.
    pub fn program_data(&self) -> &[u8] {
        &self.program_data
    }

    /// Returns the size of the instance's program data (in bytes).
    pub(crate) fn program_data_size(&self) -> usize {
        self.program_data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_program() -> Vec<u8> {
        vec![0xA1, 0x14, 0x0C, 0xFD, 0xA3]
    }

    #[test]
    fn test_program_data() {
        let test_program: Vec<u8> = setup_test_program();
        let program: Program = Program::new(test_program.clone());
        assert_eq!(program.program_data(), test_program.as_slice());
    }

    #[test]
    fn test_program_data_size() {
        let program: Program = Program::new(setup_test_program());
        assert_eq!(program.program_data_size(), 5);
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Program::default().program_data_size(), 0);
    }

    #[test]
    fn test_load_from_file_missing() {
        assert!(Program::load_from_file("/nonexistent/superchip/rom.ch8").is_err());
    }
}
