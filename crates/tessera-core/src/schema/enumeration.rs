/// Describes a fieldless enumeration by its declared variant names.
#[derive(Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: &'static str,
    pub variants: &'static [&'static str],
}

impl EnumDescriptor {
    pub const fn new(name: &'static str, variants: &'static [&'static str]) -> EnumDescriptor {
        EnumDescriptor { name, variants }
    }

    /// Returns the declared variant exactly matching `name`.
    pub fn variant(&self, name: &str) -> Option<&'static str> {
        self.variants.iter().copied().find(|variant| *variant == name)
    }
}
