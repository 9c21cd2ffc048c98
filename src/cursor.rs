/// Which side of the anchor a predicate selects.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, IsVariant, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum Side {
    #[display("before")]
    Before,
    #[display("after")]
    After,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Before => Self::After,
            Self::After => Self::Before,
        }
    }
}

/// A window of `count` records adjacent to an anchor.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct SeekPage {
    pub side: Side,
    pub count: u32,
}

impl SeekPage {
    pub fn before(count: u32) -> Self {
        Self {
            side: Side::Before,
            count,
        }
    }

    pub fn after(count: u32) -> Self {
        Self {
            side: Side::After,
            count,
        }
    }

    /// Fails when `count` exceeds [`pagination_max_count`](crate::pagination_max_count).
    pub fn validate(&self) -> crate::Result<()> {
        match crate::pagination_max_count() {
            Some(max) if self.count > *max => Err(crate::Error::PageCountTooLarge {
                count: self.count,
                max: *max,
            }),
            _ => Ok(()),
        }
    }
}
