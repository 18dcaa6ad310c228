use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionsError {
    #[error("cannot record answer {index} before answers 0..{len} exist")]
    Gap { index: usize, len: usize },
}

/// The user's answers so far: slot `i` holds the 0-based choice for question `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections(Vec<u32>);

impl Selections {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Decode the persisted slot value.
    ///
    /// Never fails: anything that is not a JSON array decodes to no answers,
    /// and array elements that are not non-negative integers are dropped
    /// while the rest keep their order.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        Self::try_from_stored(raw).unwrap_or_default()
    }

    /// Like [`Selections::from_stored`], but `None` when `raw` is not a JSON
    /// array at all.
    #[must_use]
    pub fn try_from_stored(raw: &str) -> Option<Self> {
        let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) else {
            return None;
        };
        Some(Self(items.iter().filter_map(stored_integer).collect()))
    }

    /// Encode for the persisted slot (a JSON array of integers).
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keep at most `len` answers.
    #[must_use]
    pub fn truncated(mut self, len: usize) -> Self {
        self.0.truncate(len);
        self
    }

    /// Write `choice` at position `index`, replacing or appending.
    ///
    /// # Errors
    ///
    /// Returns `SelectionsError::Gap` if earlier positions are still unanswered.
    pub fn record(&mut self, index: usize, choice: u32) -> Result<(), SelectionsError> {
        match index.cmp(&self.0.len()) {
            std::cmp::Ordering::Less => self.0[index] = choice,
            std::cmp::Ordering::Equal => self.0.push(choice),
            std::cmp::Ordering::Greater => {
                return Err(SelectionsError::Gap {
                    index,
                    len: self.0.len(),
                });
            }
        }
        Ok(())
    }

    /// Answers shifted to the 1-based encoding used by member answer vectors.
    pub fn one_based(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().map(|choice| u64::from(*choice) + 1)
    }
}

impl From<Vec<u32>> for Selections {
    fn from(value: Vec<u32>) -> Self {
        Self(value)
    }
}

fn stored_integer(value: &Value) -> Option<u32> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(int) = number.as_u64() {
        return u32::try_from(int).ok();
    }
    // `2.0` is an integer as far as the stored format is concerned.
    let float = number.as_f64()?;
    if float.fract() == 0.0 && float >= 0.0 && float <= f64::from(u32::MAX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let int = float as u32;
        return Some(int);
    }
    None
}
