use serde_derive::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

/// The default number of instruction steps executed per 60 Hz frame.
pub const DEFAULT_CYCLES_PER_FRAME: u32 = 10;
/// The default program start address within memory.
const DEFAULT_PROGRAM_ADDRESS: u16 = 0x200;
/// The default font start address within memory.
const DEFAULT_FONT_ADDRESS: u16 = 0x000;

/// Start-up configuration for the [Processor](crate::Processor).
///
/// An instance is passed to
/// [Processor::initialise_and_load()](crate::processor::Processor::initialise_and_load).
/// Options can be persisted as JSON; fields missing from a file take their default values.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// The location in memory at which the program is loaded (and the program counter set).
    pub program_start_address: u16,
    /// The location in memory at which the small font is loaded; the large font follows it.
    pub font_start_address: u16,
    /// Instruction steps per frame; timers tick once per frame.
    pub cycles_per_frame: u32,
    /// When set, FX55/FX65 leave the index register unchanged.  The program may also turn
    /// this on at runtime with 00FA.
    pub compatibility_mode: bool,
    /// When set, 00FD and 0010/0011 end the program; otherwise they decode as plain jumps.
    /// Off by default, since 0010-001F are also valid jump targets for older programs.
    pub exit_opcodes_enabled: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            program_start_address: DEFAULT_PROGRAM_ADDRESS,
            font_start_address: DEFAULT_FONT_ADDRESS,
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            compatibility_mode: false,
            exit_opcodes_enabled: false,
        }
    }
}

impl Options {
    /// Reads an [Options] instance from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - location of the JSON file
    pub fn load_from_file(path: &Path) -> io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let options: Options = serde_json::from_reader(reader)?;
        Ok(options)
    }

    /// Writes this [Options] instance to a JSON file, replacing any existing file.
    ///
    /// # Arguments
    ///
    /// * `path` - location of the JSON file
    pub fn save_to_file(&self, path: &Path) -> io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(
            options.program_start_address == 0x200
                && options.font_start_address == 0x000
                && options.cycles_per_frame == 10
                && !options.compatibility_mode
                && !options.exit_opcodes_enabled
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: Options = serde_json::from_str(r#"{ "cycles_per_frame": 20 }"#).unwrap();
        assert!(options.cycles_per_frame == 20 && options.program_start_address == 0x200);
    }

    #[test]
    fn test_save_then_load_from_file() {
        let path = env::temp_dir().join(format!("superchip-options-{}.json", std::process::id()));
        let options = Options {
            compatibility_mode: true,
            exit_opcodes_enabled: true,
            ..Options::default()
        };
        options.save_to_file(&path).unwrap();
        let loaded = Options::load_from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, options);
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = env::temp_dir().join(format!("superchip-bad-{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        let result = Options::load_from_file(&path);
        fs::remove_file(&path).unwrap();
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }
}
