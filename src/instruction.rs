use crate::error::ErrorDetail;

/// An enum with a variant for each instruction in the supported instruction set.
#[derive(Debug, PartialEq)]
pub(crate) enum Instruction {
    Op001X { exit_code: u8 },             // Exit with code X (X = 0 or 1)
    Op00CN { n: u8 },                     // Scroll N rows down
    Op00E0,                               // Clear screen
    Op00EE,                               // Return from subroutine
    Op00FA,                               // Enable compatibility mode (FX55/FX65 keep I)
    Op00FB,                               // Scroll right 4 pixels
    Op00FC,                               // Scroll left 4 pixels
    Op00FD,                               // Exit with code 0
    Op00FE,                               // Disable high-resolution mode
    Op00FF,                               // Enable high-resolution mode
    Op0NNN { nnn: u16 },                  // Jump to NNN
    Op1NNN { nnn: u16 },                  // Call subroutine at NNN
    Op3XY0 { x: usize, y: usize },        // Skip (if Vx = Vy)
    Op3XKK { x: usize, kk: u8 },          // Skip (if Vx = KK)
    Op4XKK { x: usize, kk: u8 },          // Skip (if Vx != KK)
    Op6XKK { x: usize, kk: u8 },          // Set register
    Op7XKK { x: usize, kk: u8 },          // Add (KK to Vx), no flag
    Op8XY0 { x: usize, y: usize },        // Set
    Op8XY1 { x: usize, y: usize },        // Binary OR
    Op8XY2 { x: usize, y: usize },        // Binary AND
    Op8XY3 { x: usize, y: usize },        // Logical XOR
    Op8XY4 { x: usize, y: usize },        // Add (Vy to Vx), Vf = carry
    Op8XY5 { x: usize, y: usize },        // Subtract (Vx - Vy -> Vx), Vf = borrow
    Op8XY6 { x: usize },                  // Shift Vx >> 1, Vf = shifted-out bit
    Op8XY7 { x: usize, y: usize },        // Subtract (Vy - Vx -> Vx), Vf = borrow
    Op8XYE { x: usize },                  // Shift Vx << 1, Vf = shifted-out bit
    Op9XY0 { x: usize, y: usize },        // Skip (if Vx != Vy)
    OpANNN { nnn: u16 },                  // Set I = NNN
    OpBNNN { nnn: u16 },                  // Jump to NNN + V0
    OpCXKK { x: usize, kk: u8 },          // Rnd & KK, insert to Vx
    OpDXY0 { x: usize, y: usize },        // Draw 16x16 sprite
    OpDXYN { x: usize, y: usize, n: u8 }, // Draw 8xN sprite
    OpEX9E { x: usize },                  // Skip if Vx key is pressed
    OpEXA1 { x: usize },                  // Skip if Vx key is not pressed
    OpFX07 { x: usize },                  // Vx = value of delay timer
    OpFX0A { x: usize },                  // Vx = blocks until keypress
    OpFX15 { x: usize },                  // value of delay timer = Vx
    OpFX18 { x: usize },                  // value of sound timer = Vx
    OpFX1E { x: usize },                  // I = I + Vx
    OpFX29 { x: usize },                  // I = address of small font glyph Vx
    OpFX30 { x: usize },                  // I = address of large font digit Vx
    OpFX33 { x: usize },                  // Binary-coded decimal conversion
    OpFX55 { x: usize },                  // Store V registers to memory
    OpFX65 { x: usize },                  // Load V registers from memory
    OpFX75 { x: usize },                  // Store V registers to RPL user flags
    OpFX85 { x: usize },                  // Load V registers from RPL user flags
}

impl Instruction {
    /// Constructor/builder method that parses the supplied two-byte opcode and returns the
    /// corresponding [Instruction] enum variant.  Returns [ErrorDetail::UnknownInstruction] if
    /// the opcode is not recognised.
    ///
    /// The exit opcodes (00FD, 0010, 0011) are only honoured when `exit_opcodes_enabled` is
    /// set; otherwise they fall through to the 0NNN jump like any other 0-prefixed opcode.
    ///
    /// # Arguments
    ///
    /// * `opcode` - a (big-endian) two-byte representation of the opcode to be parsed
    /// * `exit_opcodes_enabled` - whether exit requests are recognised
    pub(crate) fn decode_from(
        opcode: u16,
        exit_opcodes_enabled: bool,
    ) -> Result<Instruction, ErrorDetail> {
        let first_nibble: u16 = opcode >> 12;
        let second_nibble: u16 = (opcode & 0x0F00) >> 8;
        let third_nibble: u16 = (opcode & 0x00F0) >> 4;
        let fourth_nibble: u16 = opcode & 0x000F;
        let x: usize = second_nibble as usize;
        let y: usize = third_nibble as usize;
        let kk: u8 = (opcode & 0x00FF) as u8;
        let nnn: u16 = opcode & 0x0FFF;
        match (first_nibble, second_nibble, third_nibble, fourth_nibble) {
            (0x0, 0x0, 0x1, 0x0 | 0x1) if exit_opcodes_enabled => Ok(Instruction::Op001X {
                exit_code: fourth_nibble as u8,
            }),
            (0x0, 0x0, 0xC, _) => Ok(Instruction::Op00CN {
                n: fourth_nibble as u8,
            }),
            (0x0, 0x0, 0xE, 0x0) => Ok(Instruction::Op00E0),
            (0x0, 0x0, 0xE, 0xE) => Ok(Instruction::Op00EE),
            (0x0, 0x0, 0xF, 0xA) => Ok(Instruction::Op00FA),
            (0x0, 0x0, 0xF, 0xB) => Ok(Instruction::Op00FB),
            (0x0, 0x0, 0xF, 0xC) => Ok(Instruction::Op00FC),
            (0x0, 0x0, 0xF, 0xD) if exit_opcodes_enabled => Ok(Instruction::Op00FD),
            (0x0, 0x0, 0xF, 0xE) => Ok(Instruction::Op00FE),
            (0x0, 0x0, 0xF, 0xF) => Ok(Instruction::Op00FF),
            (0x0, ..) => Ok(Instruction::Op0NNN { nnn }),
            (0x1, ..) => Ok(Instruction::Op1NNN { nnn }),
            // The register comparison takes precedence when the low nibble is zero
            (0x3, _, _, 0x0) => Ok(Instruction::Op3XY0 { x, y }),
            (0x3, ..) => Ok(Instruction::Op3XKK { x, kk }),
            (0x4, ..) => Ok(Instruction::Op4XKK { x, kk }),
            (0x6, ..) => Ok(Instruction::Op6XKK { x, kk }),
            (0x7, ..) => Ok(Instruction::Op7XKK { x, kk }),
            (0x8, _, _, 0x0) => Ok(Instruction::Op8XY0 { x, y }),
            (0x8, _, _, 0x1) => Ok(Instruction::Op8XY1 { x, y }),
            (0x8, _, _, 0x2) => Ok(Instruction::Op8XY2 { x, y }),
            (0x8, _, _, 0x3) => Ok(Instruction::Op8XY3 { x, y }),
            (0x8, _, _, 0x4) => Ok(Instruction::Op8XY4 { x, y }),
            (0x8, _, _, 0x5) => Ok(Instruction::Op8XY5 { x, y }),
            (0x8, _, _, 0x6) => Ok(Instruction::Op8XY6 { x }),
            (0x8, _, _, 0x7) => Ok(Instruction::Op8XY7 { x, y }),
            (0x8, _, _, 0xE) => Ok(Instruction::Op8XYE { x }),
            (0x9, _, _, 0x0) => Ok(Instruction::Op9XY0 { x, y }),
            (0xA, ..) => Ok(Instruction::OpANNN { nnn }),
            (0xB, ..) => Ok(Instruction::OpBNNN { nnn }),
            (0xC, ..) => Ok(Instruction::OpCXKK { x, kk }),
            (0xD, _, _, 0x0) => Ok(Instruction::OpDXY0 { x, y }),
            (0xD, ..) => Ok(Instruction::OpDXYN {
                x,
                y,
                n: fourth_nibble as u8,
            }),
            (0xE, _, 0x9, 0xE) => Ok(Instruction::OpEX9E { x }),
            (0xE, _, 0xA, 0x1) => Ok(Instruction::OpEXA1 { x }),
            (0xF, _, 0x0, 0x7) => Ok(Instruction::OpFX07 { x }),
            (0xF, _, 0x0, 0xA) => Ok(Instruction::OpFX0A { x }),
            (0xF, _, 0x1, 0x5) => Ok(Instruction::OpFX15 { x }),
            (0xF, _, 0x1, 0x8) => Ok(Instruction::OpFX18 { x }),
            (0xF, _, 0x1, 0xE) => Ok(Instruction::OpFX1E { x }),
            (0xF, _, 0x2, 0x9) => Ok(Instruction::OpFX29 { x }),
            (0xF, _, 0x3, 0x0) => Ok(Instruction::OpFX30 { x }),
            (0xF, _, 0x3, 0x3) => Ok(Instruction::OpFX33 { x }),
            (0xF, _, 0x5, 0x5) => Ok(Instruction::OpFX55 { x }),
            (0xF, _, 0x6, 0x5) => Ok(Instruction::OpFX65 { x }),
            (0xF, _, 0x7, 0x5) => Ok(Instruction::OpFX75 { x }),
            (0xF, _, 0x8, 0x5) => Ok(Instruction::OpFX85 { x }),
            _ => Err(ErrorDetail::UnknownInstruction { opcode }),
        }
    }

    /// Returns the opcode pattern of this instruction, for logging.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Instruction::Op001X { .. } => "001X",
            Instruction::Op00CN { .. } => "00CN",
            Instruction::Op00E0 => "00E0",
            Instruction::Op00EE => "00EE",
            Instruction::Op00FA => "00FA",
            Instruction::Op00FB => "00FB",
            Instruction::Op00FC => "00FC",
            Instruction::Op00FD => "00FD",
            Instruction::Op00FE => "00FE",
            Instruction::Op00FF => "00FF",
            Instruction::Op0NNN { .. } => "0NNN",
            Instruction::Op1NNN { .. } => "1NNN",
            Instruction::Op3XY0 { .. } => "3XY0",
            Instruction::Op3XKK { .. } => "3XKK",
            Instruction::Op4XKK { .. } => "4XKK",
            Instruction::Op6XKK { .. } => "6XKK",
            Instruction::Op7XKK { .. } => "7XKK",
            Instruction::Op8XY0 { .. } => "8XY0",
            Instruction::Op8XY1 { .. } => "8XY1",
            Instruction::Op8XY2 { .. } => "8XY2",
            Instruction::Op8XY3 { .. } => "8XY3",
            Instruction::Op8XY4 { .. } => "8XY4",
            Instruction::Op8XY5 { .. } => "8XY5",
            Instruction::Op8XY6 { .. } => "8XY6",
            Instruction::Op8XY7 { .. } => "8XY7",
            Instruction::Op8XYE { .. } => "8XYE",
            Instruction::Op9XY0 { .. } => "9XY0",
            Instruction::OpANNN { .. } => "ANNN",
            Instruction::OpBNNN { .. } => "BNNN",
            Instruction::OpCXKK { .. } => "CXKK",
            Instruction::OpDXY0 { .. } => "DXY0",
            Instruction::OpDXYN { .. } => "DXYN",
            Instruction::OpEX9E { .. } => "EX9E",
            Instruction::OpEXA1 { .. } => "EXA1",
            Instruction::OpFX07 { .. } => "FX07",
            Instruction::OpFX0A { .. } => "FX0A",
            Instruction::OpFX15 { .. } => "FX15",
            Instruction::OpFX18 { .. } => "FX18",
            Instruction::OpFX1E { .. } => "FX1E",
            Instruction::OpFX29 { .. } => "FX29",
            Instruction::OpFX30 { .. } => "FX30",
            Instruction::OpFX33 { .. } => "FX33",
            Instruction::OpFX55 { .. } => "FX55",
            Instruction::OpFX65 { .. } => "FX65",
            Instruction::OpFX75 { .. } => "FX75",
            Instruction::OpFX85 { .. } => "FX85",
        }
    }

    /// Returns true if executing this instruction may change the display.
    pub(crate) fn updates_display(&self) -> bool {
        matches!(
            self,
            Instruction::Op00CN { .. }
                | Instruction::Op00E0
                | Instruction::Op00FB
                | Instruction::Op00FC
                | Instruction::Op00FE
                | Instruction::Op00FF
                | Instruction::OpDXY0 { .. }
                | Instruction::OpDXYN { .. }
        )
    }
}
