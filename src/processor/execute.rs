use super::*;
use rand::Rng;
use std::collections::HashMap;

impl Processor {
    /// Executes the 001X instruction - EXIT X
    /// Purpose: end the program with exit status X (0 or 1)
    pub(super) fn execute_001X(&mut self, exit_code: u8) -> Result<(), ErrorDetail> {
        debug!("program requested exit with code {}", exit_code);
        self.set_status(ProcessorStatus::Completed { exit_code });
        Ok(())
    }

    /// Executes the 00CN instruction - SCD nibble
    /// Purpose: scroll the display N rows down (rows of the current resolution)
    pub(super) fn execute_00CN(&mut self, n: u8) -> Result<(), ErrorDetail> {
        self.frame_buffer.scroll_down(n as usize);
        Ok(())
    }

    /// Executes the 00E0 instruction - CLS
    /// Purpose: clear the display
    pub(super) fn execute_00E0(&mut self) -> Result<(), ErrorDetail> {
        self.frame_buffer.clear();
        Ok(())
    }

    /// Executes the 00EE instruction - RET
    /// Purpose: return from a subroutine
    pub(super) fn execute_00EE(&mut self) -> Result<(), ErrorDetail> {
        self.program_counter = self.stack.pop()?;
        Ok(())
    }

    /// Executes the 00FA instruction - COMPAT
    /// Purpose: from now on FX55 and FX65 leave the index register unchanged
    pub(super) fn execute_00FA(&mut self) -> Result<(), ErrorDetail> {
        debug!("compatibility mode enabled");
        self.compatibility_mode = true;
        Ok(())
    }

    /// Executes the 00FB instruction - SCR
    /// Purpose: scroll the display right by 4 pixels
    pub(super) fn execute_00FB(&mut self) -> Result<(), ErrorDetail> {
        self.frame_buffer.scroll_right();
        Ok(())
    }

    /// Executes the 00FC instruction - SCL
    /// Purpose: scroll the display left by 4 pixels
    pub(super) fn execute_00FC(&mut self) -> Result<(), ErrorDetail> {
        self.frame_buffer.scroll_left();
        Ok(())
    }

    /// Executes the 00FD instruction - EXIT
    /// Purpose: end the program with a successful exit status
    pub(super) fn execute_00FD(&mut self) -> Result<(), ErrorDetail> {
        self.execute_001X(0)
    }

    /// Executes the 00FE instruction - LOW
    /// Purpose: switch to low-resolution (64x32) mode; the buffer is kept
    pub(super) fn execute_00FE(&mut self) -> Result<(), ErrorDetail> {
        debug!("low resolution mode");
        self.frame_buffer.set_high_resolution(false);
        Ok(())
    }

    /// Executes the 00FF instruction - HIGH
    /// Purpose: switch to high-resolution (128x64) mode; the buffer is kept
    pub(super) fn execute_00FF(&mut self) -> Result<(), ErrorDetail> {
        debug!("high resolution mode");
        self.frame_buffer.set_high_resolution(true);
        Ok(())
    }

    /// Executes the 0NNN instruction - JP addr
    /// Purpose: jump to address NNN
    pub(super) fn execute_0NNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        self.program_counter = nnn;
        Ok(())
    }

    /// Executes the 1NNN instruction - CALL addr
    /// Purpose: push the return address and jump to subroutine at NNN
    pub(super) fn execute_1NNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        // The program counter already points past this instruction
        self.stack.push(self.program_counter)?;
        self.program_counter = nnn;
        Ok(())
    }

    /// Executes the 3XY0 instruction - SE Vx, Vy
    /// Purpose: skip next instruction if Vx = Vy
    pub(super) fn execute_3XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if self.variable_registers[x] == self.variable_registers[y] {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Executes the 3XKK instruction - SE Vx, byte
    /// Purpose: skip next instruction if Vx = KK
    pub(super) fn execute_3XKK(&mut self, x: usize, kk: u8) -> Result<(), ErrorDetail> {
        if self.variable_registers[x] == kk {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Executes the 4XKK instruction - SNE Vx, byte
    /// Purpose: skip next instruction if Vx != KK
    pub(super) fn execute_4XKK(&mut self, x: usize, kk: u8) -> Result<(), ErrorDetail> {
        if self.variable_registers[x] != kk {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Executes the 6XKK instruction - LD Vx, byte
    /// Purpose: set Vx = KK
    pub(super) fn execute_6XKK(&mut self, x: usize, kk: u8) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = kk;
        Ok(())
    }

    /// Executes the 7XKK instruction - ADD Vx, byte
    /// Purpose: set Vx = Vx + KK (wrapping, VF untouched)
    pub(super) fn execute_7XKK(&mut self, x: usize, kk: u8) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = self.variable_registers[x].wrapping_add(kk);
        Ok(())
    }

    /// Executes the 8XY0 instruction - LD Vx, Vy
    /// Purpose: set Vx = Vy
    pub(super) fn execute_8XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = self.variable_registers[y];
        Ok(())
    }

    /// Executes the 8XY1 instruction - OR Vx, Vy
    /// Purpose: set Vx = Vx OR Vy
    pub(super) fn execute_8XY1(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] |= self.variable_registers[y];
        Ok(())
    }

    /// Executes the 8XY2 instruction - AND Vx, Vy
    /// Purpose: set Vx = Vx AND Vy
    pub(super) fn execute_8XY2(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] &= self.variable_registers[y];
        Ok(())
    }

    /// Executes the 8XY3 instruction - XOR Vx, Vy
    /// Purpose: set Vx = Vx XOR Vy
    pub(super) fn execute_8XY3(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] ^= self.variable_registers[y];
        Ok(())
    }

    /// Executes the 8XY4 instruction - ADD Vx, Vy
    /// Purpose: set Vx = Vx + Vy, VF = 1 on carry out of bit 7
    pub(super) fn execute_8XY4(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let (result, carry) =
            self.variable_registers[x].overflowing_add(self.variable_registers[y]);
        self.variable_registers[x] = result;
        // The flag is written last so it wins when x = F
        self.variable_registers[FLAG_REGISTER] = carry as u8;
        Ok(())
    }

    /// Executes the 8XY5 instruction - SUB Vx, Vy
    /// Purpose: set Vx = Vx - Vy, VF = 1 if Vx < Vy (borrow)
    pub(super) fn execute_8XY5(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let (result, borrow) =
            self.variable_registers[x].overflowing_sub(self.variable_registers[y]);
        self.variable_registers[x] = result;
        self.variable_registers[FLAG_REGISTER] = borrow as u8;
        Ok(())
    }

    /// Executes the 8XY6 instruction - SHR Vx
    /// Purpose: set Vx = Vx >> 1, VF = the bit shifted out
    pub(super) fn execute_8XY6(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let shifted_out: u8 = self.variable_registers[x] & 0x1;
        self.variable_registers[x] >>= 1;
        self.variable_registers[FLAG_REGISTER] = shifted_out;
        Ok(())
    }

    /// Executes the 8XY7 instruction - SUBN Vx, Vy
    /// Purpose: set Vx = Vy - Vx, VF = 1 if Vy < Vx (borrow)
    pub(super) fn execute_8XY7(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let (result, borrow) =
            self.variable_registers[y].overflowing_sub(self.variable_registers[x]);
        self.variable_registers[x] = result;
        self.variable_registers[FLAG_REGISTER] = borrow as u8;
        Ok(())
    }

    /// Executes the 8XYE instruction - SHL Vx
    /// Purpose: set Vx = Vx << 1, VF = the bit shifted out
    pub(super) fn execute_8XYE(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let shifted_out: u8 = self.variable_registers[x] >> 7;
        self.variable_registers[x] <<= 1;
        self.variable_registers[FLAG_REGISTER] = shifted_out;
        Ok(())
    }

    /// Executes the 9XY0 instruction - SNE Vx, Vy
    /// Purpose: skip next instruction if Vx != Vy
    pub(super) fn execute_9XY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        if self.variable_registers[x] != self.variable_registers[y] {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Executes the ANNN instruction - LD I, addr
    /// Purpose: set I = NNN
    pub(super) fn execute_ANNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        self.index_register = nnn;
        Ok(())
    }

    /// Executes the BNNN instruction - JP V0, addr
    /// Purpose: jump to NNN + V0
    pub(super) fn execute_BNNN(&mut self, nnn: u16) -> Result<(), ErrorDetail> {
        self.program_counter = nnn + self.variable_registers[0x0] as u16;
        Ok(())
    }

    /// Executes the CXKK instruction - RND Vx, byte
    /// Purpose: set Vx = random byte AND KK
    pub(super) fn execute_CXKK(&mut self, x: usize, kk: u8) -> Result<(), ErrorDetail> {
        let random: u8 = rand::thread_rng().gen();
        self.variable_registers[x] = random & kk;
        Ok(())
    }

    /// Executes the DXY0 instruction - DRW Vx, Vy, 0
    /// Purpose: XOR a 16x16 sprite (32 bytes at I, two per row) on to the display at (Vx, Vy),
    /// setting VF = 1 if any pixel was turned off
    pub(super) fn execute_DXY0(&mut self, x: usize, y: usize) -> Result<(), ErrorDetail> {
        let sprite: &[u8] = self.memory.read_bytes(self.index_register as usize, 32)?;
        let rows: Vec<u16> = sprite
            .chunks_exact(2)
            .map(|pair| ((pair[0] as u16) << 8) | pair[1] as u16)
            .collect();
        let collision: bool = self.frame_buffer.draw_sprite(
            self.variable_registers[x] as usize,
            self.variable_registers[y] as usize,
            &rows,
            16,
        );
        self.variable_registers[FLAG_REGISTER] = collision as u8;
        Ok(())
    }

    /// Executes the DXYN instruction - DRW Vx, Vy, nibble
    /// Purpose: XOR an 8xN sprite (N bytes at I) on to the display at (Vx, Vy), setting
    /// VF = 1 if any pixel was turned off.  Rows and columns past the display edge are clipped.
    pub(super) fn execute_DXYN(&mut self, x: usize, y: usize, n: u8) -> Result<(), ErrorDetail> {
        let sprite: &[u8] = self
            .memory
            .read_bytes(self.index_register as usize, n as usize)?;
        let rows: Vec<u16> = sprite.iter().map(|byte| *byte as u16).collect();
        let collision: bool = self.frame_buffer.draw_sprite(
            self.variable_registers[x] as usize,
            self.variable_registers[y] as usize,
            &rows,
            8,
        );
        self.variable_registers[FLAG_REGISTER] = collision as u8;
        Ok(())
    }

    /// Executes the EX9E instruction - SKP Vx
    /// Purpose: skip next instruction if the key (Vx & 0xF) is held
    pub(super) fn execute_EX9E(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if self.keystate.is_key_pressed(self.variable_registers[x]) {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Executes the EXA1 instruction - SKNP Vx
    /// Purpose: skip next instruction if the key (Vx & 0xF) is not held
    pub(super) fn execute_EXA1(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if !self.keystate.is_key_pressed(self.variable_registers[x]) {
            self.program_counter += 2;
        }
        Ok(())
    }

    /// Executes the FX07 instruction - LD Vx, DT
    /// Purpose: set Vx = delay timer
    pub(super) fn execute_FX07(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.variable_registers[x] = self.delay_timer;
        Ok(())
    }

    /// Executes the FX0A instruction - LD Vx, K
    /// Purpose: wait for a fresh key press and store its value in Vx.  Keys already held when
    /// the wait starts only count once released and pressed again.
    pub(super) fn execute_FX0A(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if self.status == ProcessorStatus::Running {
            self.keystate.exclude_held_keys();
        }
        match self.keystate.take_eligible_key() {
            Some(key) => {
                self.variable_registers[x] = key;
                self.set_status(ProcessorStatus::Running);
            }
            None => {
                // Rewind so this instruction runs again on the next step
                self.program_counter -= 2;
                self.set_status(ProcessorStatus::WaitingForKeypress);
            }
        }
        Ok(())
    }

    /// Executes the FX15 instruction - LD DT, Vx
    /// Purpose: set delay timer = Vx
    pub(super) fn execute_FX15(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.delay_timer = self.variable_registers[x];
        Ok(())
    }

    /// Executes the FX18 instruction - LD ST, Vx
    /// Purpose: set sound timer = Vx
    pub(super) fn execute_FX18(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.sound_timer = self.variable_registers[x];
        Ok(())
    }

    /// Executes the FX1E instruction - ADD I, Vx
    /// Purpose: set I = I + Vx (VF untouched)
    pub(super) fn execute_FX1E(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.index_register = self
            .index_register
            .wrapping_add(self.variable_registers[x] as u16);
        Ok(())
    }

    /// Executes the FX29 instruction - LD F, Vx
    /// Purpose: point I at the small font glyph for hex digit (Vx & 0xF)
    pub(super) fn execute_FX29(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let glyph: usize = (self.variable_registers[x] & 0xF) as usize;
        self.index_register = Font::small().glyph_address(self.font_start_address, glyph) as u16;
        Ok(())
    }

    /// Executes the FX30 instruction - LD HF, Vx
    /// Purpose: point I at the large font glyph for decimal digit (Vx & 0xF); digits above 9
    /// have no glyph and return [ErrorDetail::OperandsOutOfBounds]
    pub(super) fn execute_FX30(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let large_font: Font = Font::large();
        let digit: usize = (self.variable_registers[x] & 0xF) as usize;
        if digit >= large_font.glyph_count() {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("vx".to_string(), digit);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.index_register = large_font.glyph_address(self.large_font_start_address, digit) as u16;
        Ok(())
    }

    /// Executes the FX33 instruction - LD B, Vx
    /// Purpose: store the decimal digits of Vx at I (hundreds), I+1 (tens) and I+2 (units)
    pub(super) fn execute_FX33(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let value: u8 = self.variable_registers[x];
        let digits: [u8; 3] = [value / 100, (value % 100) / 10, value % 10];
        self.memory
            .write_bytes(self.index_register as usize, &digits)?;
        Ok(())
    }

    /// Executes the FX55 instruction - LD [I], Vx
    /// Purpose: store V0 to Vx at I onwards, then advance I by X + 1 unless in compatibility mode
    pub(super) fn execute_FX55(&mut self, x: usize) -> Result<(), ErrorDetail> {
        self.memory.write_bytes(
            self.index_register as usize,
            &self.variable_registers[..=x],
        )?;
        if !self.compatibility_mode {
            self.index_register += x as u16 + 1;
        }
        Ok(())
    }

    /// Executes the FX65 instruction - LD Vx, [I]
    /// Purpose: load V0 to Vx from I onwards, then advance I by X + 1 unless in compatibility mode
    pub(super) fn execute_FX65(&mut self, x: usize) -> Result<(), ErrorDetail> {
        let values: &[u8] = self
            .memory
            .read_bytes(self.index_register as usize, x + 1)?;
        self.variable_registers[..=x].copy_from_slice(values);
        if !self.compatibility_mode {
            self.index_register += x as u16 + 1;
        }
        Ok(())
    }

    /// Executes the FX75 instruction - LD R, Vx
    /// Purpose: store V0 to Vx in the RPL user flags (X <= 7)
    pub(super) fn execute_FX75(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= RPL_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.rpl_registers[..=x].copy_from_slice(&self.variable_registers[..=x]);
        Ok(())
    }

    /// Executes the FX85 instruction - LD Vx, R
    /// Purpose: load V0 to Vx from the RPL user flags (X <= 7)
    pub(super) fn execute_FX85(&mut self, x: usize) -> Result<(), ErrorDetail> {
        if x >= RPL_REGISTER_COUNT {
            let mut operands: HashMap<String, usize> = HashMap::new();
            operands.insert("x".to_string(), x);
            return Err(ErrorDetail::OperandsOutOfBounds { operands });
        }
        self.variable_registers[..=x].copy_from_slice(&self.rpl_registers[..=x]);
        Ok(())
    }
}
