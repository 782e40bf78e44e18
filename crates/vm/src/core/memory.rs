use crate::error::Fault;

use super::word::{Word, WordExt, WORD_SIZE};

/// The default upper bound on memory growth, in bytes.
pub const DEFAULT_MEMORY_LIMIT: usize = 32 * 1024 * 1024;

/// The [`Memory`] struct represents the byte-addressable memory of the VM.
///
/// Memory is conceptually infinite and zero-initialized. It is backed by a vector that grows
/// in 32-byte words the first time an access reaches past its current size, and never past
/// its configured limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Memory {
    /// Vector storing memory data
    memory: Vec<u8>,

    /// Maximum size the memory may grow to, in bytes
    limit: usize,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Creates a new, empty [`Memory`] bounded by [`DEFAULT_MEMORY_LIMIT`].
    pub fn new() -> Memory {
        Memory::with_limit(DEFAULT_MEMORY_LIMIT)
    }

    /// Creates a new, empty [`Memory`] that may grow up to `limit` bytes.
    ///
    /// Memory only grows in whole words, so a limit that is not a multiple of 32 is rounded
    /// down to one.
    ///
    /// ```
    /// use evmi_vm::core::memory::Memory;
    ///
    /// assert_eq!(Memory::with_limit(100).limit(), 96);
    /// ```
    pub fn with_limit(limit: usize) -> Memory {
        let limit = limit - limit % WORD_SIZE;
        Memory { memory: Vec::with_capacity(2048.min(limit)), limit }
    }

    /// Gets the current size of the memory in bytes.
    ///
    /// ```
    /// use evmi_vm::core::memory::Memory;
    ///
    /// let memory = Memory::new();
    /// assert_eq!(memory.size(), 0);
    /// ```
    pub fn size(&self) -> usize {
        self.memory.len()
    }

    /// The maximum size of the memory in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The raw memory contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }

    /// The word-aligned size memory must have to cover `size` bytes at `offset`.
    fn required_size(&self, offset: usize, size: usize) -> Result<usize, Fault> {
        if size == 0 {
            return Ok(self.size());
        }

        let required = offset
            .checked_add(size)
            .and_then(|end| end.checked_next_multiple_of(WORD_SIZE))
            .ok_or(Fault::MemoryLimitExceeded)?;

        if required > self.limit {
            return Err(Fault::MemoryLimitExceeded);
        }
        Ok(required.max(self.size()))
    }

    /// Extends the memory to cover `size` bytes at `offset`, if necessary. New bytes are
    /// zeroed.
    ///
    /// ```
    /// use evmi_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.extend(0, 33).unwrap();
    /// assert_eq!(memory.size(), 64);
    /// ```
    pub fn extend(&mut self, offset: usize, size: usize) -> Result<(), Fault> {
        let new_size = self.required_size(offset, size)?;
        if new_size > self.size() {
            self.memory.resize(new_size, 0u8);
        }
        Ok(())
    }

    /// Store the given bytes in memory at the given offset, extending it if necessary.
    ///
    /// ```
    /// use evmi_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.store(31, &[0xff]).unwrap();
    /// assert_eq!(memory.size(), 32);
    /// assert_eq!(memory.as_slice()[31], 0xff);
    /// ```
    pub fn store(&mut self, offset: usize, value: &[u8]) -> Result<(), Fault> {
        if value.is_empty() {
            return Ok(());
        }
        self.extend(offset, value.len())?;
        self.memory[offset..offset + value.len()].copy_from_slice(value);
        Ok(())
    }

    /// Read `size` bytes at `offset`, extending the memory if necessary.
    ///
    /// ```
    /// use evmi_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// assert_eq!(memory.read(4, 2).unwrap(), vec![0, 0]);
    /// assert_eq!(memory.size(), 32);
    /// ```
    pub fn read(&mut self, offset: usize, size: usize) -> Result<Vec<u8>, Fault> {
        if size == 0 {
            return Ok(Vec::new());
        }
        self.extend(offset, size)?;
        Ok(self.memory[offset..offset + size].to_vec())
    }

    /// Writes the 32-byte big-endian encoding of `value` at `offset`.
    pub fn store_word(&mut self, offset: usize, value: Word) -> Result<(), Fault> {
        self.store(offset, &value.to_be_word_bytes())
    }

    /// Reads 32 bytes at `offset` as a big-endian word.
    pub fn read_word(&mut self, offset: usize) -> Result<Word, Fault> {
        self.extend(offset, WORD_SIZE)?;
        let mut buffer = [0u8; WORD_SIZE];
        buffer.copy_from_slice(&self.memory[offset..offset + WORD_SIZE]);
        Ok(Word::from_be_bytes(buffer))
    }

    /// Calculate the current memory cost
    ///
    /// ```
    /// use evmi_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.store(0, &[0xff]).unwrap();
    /// assert_eq!(memory.memory_cost(), 3);
    /// ```
    pub fn memory_cost(&self) -> u64 {
        Self::cost_of(self.size())
    }

    /// Calculate the cost of extending the memory to cover `size` bytes at `offset`.
    ///
    /// ```
    /// use evmi_vm::core::memory::Memory;
    ///
    /// let mut memory = Memory::new();
    /// memory.store(0, &[0xff]).unwrap();
    /// assert_eq!(memory.expansion_cost(0, 32), Ok(0));
    /// assert_eq!(memory.expansion_cost(0, 64), Ok(3));
    /// ```
    pub fn expansion_cost(&self, offset: usize, size: usize) -> Result<u64, Fault> {
        let new_size = self.required_size(offset, size)?;
        Ok(Self::cost_of(new_size).saturating_sub(self.memory_cost()))
    }

    fn cost_of(size: usize) -> u64 {
        let words = (size as u64).div_ceil(WORD_SIZE as u64);
        (words.saturating_mul(words) / 512).saturating_add(words.saturating_mul(3))
    }
}
