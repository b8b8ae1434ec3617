use crate::error::ErrorDetail;

/// The memory size in bytes; every byte is addressable.
pub(crate) const MEMORY_SIZE_BYTES: usize = 0x1000;

/// An abstraction of the 4 KiB memory space.
#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    /// A stack-allocated array of bytes representing the entire memory space
    pub bytes: [u8; MEMORY_SIZE_BYTES],
}

impl Memory {
    /// Constructor that returns a [Memory] instance initialised with all bytes 0x00.
    pub(crate) fn new() -> Self {
        Self {
            bytes: [0x0; MEMORY_SIZE_BYTES],
        }
    }

    /// Returns an array slice from memory as per the specified start address and
    /// number of bytes.  If the slice would extend beyond addressable memory then returns
    /// [ErrorDetail::MemoryAddressOutOfBounds] naming the first unaddressable byte.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address at the start of the range from which to read
    /// * `num_bytes` - the number of bytes to read from memory
    pub fn read_bytes(&self, start_address: usize, num_bytes: usize) -> Result<&[u8], ErrorDetail> {
        let end_address: usize = start_address + num_bytes;
        if end_address > MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: start_address.max(MEMORY_SIZE_BYTES) as u16,
            });
        }
        Ok(&self.bytes[start_address..end_address])
    }

    /// Returns a 16-bit unsigned integer constructed big-endian from two consecutive bytes
    /// starting at the specified address.  Used to fetch opcodes.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address of the first (most significant) byte to read
    pub fn read_two_bytes(&self, start_address: usize) -> Result<u16, ErrorDetail> {
        if start_address + 1 >= MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: (start_address + 1) as u16,
            });
        }
        Ok(((self.bytes[start_address] as u16) << 8) | self.bytes[start_address + 1] as u16)
    }

    /// Writes the passed byte slice to memory starting at the specified address.  Nothing is
    /// written if any byte would land outside addressable memory.
    ///
    /// # Arguments
    ///
    /// * `start_address` - the memory address at the start of the range to which to write
    /// * `bytes_to_write` - the array slice containing the bytes to write to memory
    pub fn write_bytes(
        &mut self,
        start_address: usize,
        bytes_to_write: &[u8],
    ) -> Result<(), ErrorDetail> {
        let end_address: usize = start_address + bytes_to_write.len();
        if end_address > MEMORY_SIZE_BYTES {
            return Err(ErrorDetail::MemoryAddressOutOfBounds {
                address: start_address.max(MEMORY_SIZE_BYTES) as u16,
            });
        }
        self.bytes[start_address..end_address].copy_from_slice(bytes_to_write);
        Ok(())
    }

    /// Returns the size of the addressable memory space in bytes
    pub fn max_addressable_size(&self) -> usize {
        MEMORY_SIZE_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_two_bytes() {
        let mut memory = Memory::new();
        memory.bytes[0x3] = 0xF2;
        memory.bytes[0x4] = 0x1C;
        assert_eq!(memory.read_two_bytes(0x3).unwrap(), 0xF21C);
    }

    #[test]
    fn test_read_two_bytes_out_of_bounds_error() {
        let memory = Memory::new();
        assert_eq!(
            memory.read_two_bytes(MEMORY_SIZE_BYTES - 1).unwrap_err(),
            ErrorDetail::MemoryAddressOutOfBounds { address: 0x1000 }
        );
    }

    #[test]
    fn test_read_bytes() {
        let mut memory = Memory::new();
        memory.bytes[0x3] = 0xF2;
        memory.bytes[0x4] = 0x18;
        memory.bytes[0x5] = 0xCC;
        let mem_slice: &[u8] = memory.read_bytes(0x3, 3).unwrap();
        assert_eq!(mem_slice, &[0xF2, 0x18, 0xCC]);
    }

    #[test]
    fn test_read_bytes_empty() {
        let memory = Memory::new();
        assert!(memory.read_bytes(0x200, 0).unwrap().is_empty());
    }

    #[test]
    fn test_read_bytes_out_of_bounds_error() {
        let memory = Memory::new();
        assert_eq!(
            memory.read_bytes(MEMORY_SIZE_BYTES - 1, 2).unwrap_err(),
            ErrorDetail::MemoryAddressOutOfBounds { address: 0x1000 }
        );
    }

    #[test]
    fn test_write_bytes() {
        let mut memory = Memory::new();
        let bytes_to_write: [u8; 3] = [0xF2, 0x18, 0xCC];
        memory.write_bytes(0x3, &bytes_to_write).unwrap();
        assert!(
            memory.bytes[0x3] == 0xF2 && memory.bytes[0x4] == 0x18 && memory.bytes[0x5] == 0xCC
        );
    }

    #[test]
    fn test_write_bytes_out_of_bounds_error() {
        let mut memory = Memory::new();
        let bytes_to_write: [u8; 2] = [0xF2, 0x18];
        assert!(
            memory
                .write_bytes(MEMORY_SIZE_BYTES - 1, &bytes_to_write)
                .is_err()
                && memory.bytes[MEMORY_SIZE_BYTES - 1] == 0x0
        );
    }
}
