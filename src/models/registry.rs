use crate::models::mod_record::ModRecord;

/// Direction of a single load-order step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the start of the load order.
    Earlier,
    /// Towards the end of the load order.
    Later,
}

/// Ordered collection of mods. Order is load order, display order and the
/// order used when writing files back.
///
/// The registry is the only owner of its records; lookups are linear scans,
/// which is fine for the tens to low hundreds of mods a game holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModRegistry {
    mods: Vec<ModRecord>,
}

impl ModRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, base_id: &str) -> Option<&ModRecord> {
        self.mods.iter().find(|m| m.base_id() == base_id)
    }

    pub fn find_mut(&mut self, base_id: &str) -> Option<&mut ModRecord> {
        self.mods.iter_mut().find(|m| m.base_id() == base_id)
    }

    pub fn position(&self, base_id: &str) -> Option<usize> {
        self.mods.iter().position(|m| m.base_id() == base_id)
    }

    /// Return the record for `base_id`, appending an empty one if needed.
    pub fn get_or_create(&mut self, base_id: &str) -> &mut ModRecord {
        let index = match self.position(base_id) {
            Some(index) => index,
            None => {
                self.mods.push(ModRecord::new(base_id));
                self.mods.len() - 1
            }
        };
        &mut self.mods[index]
    }

    /// Exchange a record with its neighbour in `direction`.
    ///
    /// Returns the record's new index, or `None` when it is unknown or
    /// already at that end of the order.
    pub fn swap_adjacent(&mut self, base_id: &str, direction: Direction) -> Option<usize> {
        let index = self.position(base_id)?;
        let target = match direction {
            Direction::Earlier => index.checked_sub(1)?,
            Direction::Later if index + 1 < self.mods.len() => index + 1,
            Direction::Later => return None,
        };
        self.mods.swap(index, target);
        Some(target)
    }

    /// Move the named records to the front, in the given order, keeping the
    /// relative order of everything else. Unknown names are skipped.
    pub fn promote<'a, I>(&mut self, ordered_ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rest = std::mem::take(&mut self.mods);
        for base_id in ordered_ids {
            if let Some(index) = rest.iter().position(|m| m.base_id() == base_id) {
                self.mods.push(rest.remove(index));
            }
        }
        self.mods.extend(rest);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModRecord> {
        self.mods.iter()
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    pub fn base_ids(&self) -> Vec<&str> {
        self.mods.iter().map(|m| m.base_id()).collect()
    }
}
