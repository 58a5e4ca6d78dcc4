/// Upper bound on the number of lines a layout pass may render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MaxLines {
    #[default]
    Unbounded,
    Limited(usize),
}

impl MaxLines {
    /// Interprets the toolkit convention where `-1` means "no limit".
    ///
    /// Returns `None` for zero and for negative values other than `-1`.
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            -1 => Some(Self::Unbounded),
            n if n >= 1 => Some(Self::Limited(n as usize)),
            _ => None,
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            Self::Unbounded => -1,
            Self::Limited(n) => i32::try_from(n).unwrap_or(i32::MAX),
        }
    }

    pub fn limit(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Limited(n) => Some(n),
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Whether `lines` rendered lines stay within this cap.
    pub fn allows(self, lines: usize) -> bool {
        self.limit().map_or(true, |limit| lines <= limit)
    }
}

impl From<usize> for MaxLines {
    fn from(value: usize) -> Self {
        Self::Limited(value)
    }
}
