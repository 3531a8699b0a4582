/// Token representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,      // The normalized term
    pub position: u32,     // Word position in the source text
    pub offset: usize,     // Byte offset in the source text
    pub length: usize,     // Length of the original word in bytes
}

impl Token {
    pub fn new(text: String, position: u32, offset: usize) -> Self {
        let length = text.len();
        Token {
            text,
            position,
            offset,
            length,
        }
    }
}
