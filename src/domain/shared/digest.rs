/// Deterministic MD5 digest over a sequence of string fields.
///
/// Fields are separated by the ASCII unit separator so that `("ab", "c")` and
/// `("a", "bc")` never collide.
pub struct ContentDigest {
    context: md5::Context,
}

const FIELD_SEPARATOR: &[u8] = &[0x1f];

impl ContentDigest {
    pub fn new() -> Self {
        Self {
            context: md5::Context::new(),
        }
    }

    pub fn field(mut self, value: impl AsRef<[u8]>) -> Self {
        self.context.consume(value.as_ref());
        self.context.consume(FIELD_SEPARATOR);
        self
    }

    /// Lowercase hex digest
    pub fn finish(self) -> String {
        format!("{:x}", self.context.compute())
    }
}

impl Default for ContentDigest {
    fn default() -> Self {
        Self::new()
    }
}
