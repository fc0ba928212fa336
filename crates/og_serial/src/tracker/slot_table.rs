use og_utils::hash::HashMap;

use crate::SerialError;
use crate::graph::{Graph, Object, ObjectId};
use crate::tracker::Slot;

enum Entry {
    Reserved { id: ObjectId, populated: bool },
    /// The object was left out, so are references to it.
    Skipped,
}

/// Decode-side identity table.
///
/// An object is reserved as soon as its slot is read, before its body is
/// decoded, so references from inside the body resolve to the same instance.
/// The reserved shell is replaced in place once the body is complete.
///
/// Objects of unknown type still claim their slot, as skipped: references to
/// them are dropped like the object itself instead of dangling.
#[derive(Default)]
pub struct SlotTable {
    entries: HashMap<Slot, Entry>,
}

impl SlotTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    fn check_free(&self, slot: Slot) -> Result<(), SerialError> {
        if self.entries.contains_key(&slot) {
            return Err(SerialError::malformed(format!(
                "object slot {slot} is defined twice"
            )));
        }
        Ok(())
    }

    /// Allocates `shell` in `graph` under `slot`.
    ///
    /// Fails with [`SerialError::Malformed`] if the slot was already claimed.
    pub fn reserve(
        &mut self,
        slot: Slot,
        shell: Object,
        graph: &mut Graph,
    ) -> Result<ObjectId, SerialError> {
        self.check_free(slot)?;
        let id = graph.insert(shell);
        self.entries.insert(
            slot,
            Entry::Reserved {
                id,
                populated: false,
            },
        );
        Ok(id)
    }

    /// Marks `slot` as belonging to an object that is not decoded.
    ///
    /// Fails with [`SerialError::Malformed`] if the slot was already claimed.
    pub fn skip(&mut self, slot: Slot) -> Result<(), SerialError> {
        self.check_free(slot)?;
        self.entries.insert(slot, Entry::Skipped);
        Ok(())
    }

    /// Replaces the shell reserved under `slot` with the finished object.
    pub fn populate(
        &mut self,
        slot: Slot,
        object: Object,
        graph: &mut Graph,
    ) -> Result<ObjectId, SerialError> {
        match self.entries.get_mut(&slot) {
            Some(Entry::Reserved { id, populated }) => {
                graph.replace(*id, object);
                *populated = true;
                Ok(*id)
            }
            Some(Entry::Skipped) => Err(SerialError::malformed(format!(
                "object slot {slot} was skipped"
            ))),
            None => Err(SerialError::DanglingReference { slot }),
        }
    }

    /// Returns the object reserved under `slot`, populated or not.
    ///
    /// `None` means the object was skipped.
    pub fn resolve(&self, slot: Slot) -> Result<Option<ObjectId>, SerialError> {
        match self.entries.get(&slot) {
            Some(Entry::Reserved { id, .. }) => Ok(Some(*id)),
            Some(Entry::Skipped) => Ok(None),
            None => Err(SerialError::DanglingReference { slot }),
        }
    }

    #[inline]
    pub fn is_populated(&self, slot: Slot) -> bool {
        matches!(
            self.entries.get(&slot),
            Some(Entry::Reserved {
                populated: true,
                ..
            })
        )
    }

    #[inline]
    pub fn is_skipped(&self, slot: Slot) -> bool {
        matches!(self.entries.get(&slot), Some(Entry::Skipped))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::SlotTable;
    use crate::SerialError;
    use crate::graph::{Graph, Object, Value};
    use crate::tracker::Slot;

    #[test]
    fn reserve_then_populate() {
        let mut graph = Graph::new();
        let mut table = SlotTable::new();

        let id = table.reserve(Slot(0), Object::Sequence(Vec::new()), &mut graph).unwrap();
        assert_eq!(table.resolve(Slot(0)).unwrap(), Some(id));
        assert!(!table.is_populated(Slot(0)));

        let items = vec![Value::from(id)];
        assert_eq!(table.populate(Slot(0), Object::Sequence(items), &mut graph).unwrap(), id);
        assert!(table.is_populated(Slot(0)));
        assert_eq!(graph.get(id).unwrap().as_sequence().unwrap()[0], Value::Object(id));
    }

    #[test]
    fn skipped_slots() {
        let mut graph = Graph::new();
        let mut table = SlotTable::new();

        table.skip(Slot(2)).unwrap();
        assert!(table.is_skipped(Slot(2)));
        assert_eq!(table.resolve(Slot(2)).unwrap(), None);
        assert!(graph.is_empty());

        assert!(matches!(table.skip(Slot(2)), Err(SerialError::Malformed(_))));
        assert!(matches!(
            table.reserve(Slot(2), Object::Sequence(Vec::new()), &mut graph),
            Err(SerialError::Malformed(_))
        ));
        assert!(matches!(
            table.populate(Slot(2), Object::Sequence(Vec::new()), &mut graph),
            Err(SerialError::Malformed(_))
        ));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn errors() {
        let mut graph = Graph::new();
        let mut table = SlotTable::new();

        assert!(matches!(
            table.resolve(Slot(4)),
            Err(SerialError::DanglingReference { slot: Slot(4) })
        ));

        table.reserve(Slot(1), Object::Map(Vec::new()), &mut graph).unwrap();
        assert!(matches!(
            table.reserve(Slot(1), Object::Map(Vec::new()), &mut graph),
            Err(SerialError::Malformed(_))
        ));
    }
}
