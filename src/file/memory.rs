use super::Backend;

/// Input file backed by memory
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a new memory backend
    ///
    /// ## Arguments
    /// * 'data' - The data buffer to consume
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend() {
        let memory = Memory::new(b"[]".to_vec());
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.data(), b"[]");

        let empty = Memory::new(Vec::new());
        assert!(empty.is_empty());
    }
}
