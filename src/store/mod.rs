pub mod format;
pub mod ordering;
pub mod report;

use tracing::{debug, warn};

use crate::resource::ResourceTree;
use crate::slots::{chunk, reassemble, Reassembly, ReassemblyError, SlotLimits, SlotTransport};
use crate::types::{ResourceRef, StateVersion, WorkingSet};
pub use ordering::{ByName, SetOrder};
pub use report::{SaveReport, StoreError, StoreWarning};

/// Working sets for one session, persisted across bounded storage slots.
///
/// Built once per request by [`WorkingSetStore::restore`]; every mutation
/// re-serializes the whole collection and rewrites the slots. A
/// `StoreError` from a mutation means the change is live in memory but was
/// not persisted; callers that ignore it get the last successfully written
/// state on the next request.
pub struct WorkingSetStore<'t, R: ?Sized, T, O = ByName> {
    tree: &'t R,
    transport: T,
    limits: SlotLimits,
    order: O,
    /// Empty means "all resources".
    current: String,
    sets: Vec<WorkingSet>,
    warnings: Vec<StoreWarning>,
    version: Option<StateVersion>,
}

impl<'t, R, T> WorkingSetStore<'t, R, T, ByName>
where
    R: ResourceTree + ?Sized,
    T: SlotTransport,
{
    pub fn restore(tree: &'t R, transport: T, limits: SlotLimits) -> Self {
        Self::restore_with_order(tree, transport, limits, ByName)
    }
}

impl<'t, R, T, O> WorkingSetStore<'t, R, T, O>
where
    R: ResourceTree + ?Sized,
    T: SlotTransport,
    O: SetOrder,
{
    pub fn restore_with_order(tree: &'t R, transport: T, limits: SlotLimits, order: O) -> Self {
        let mut store = Self {
            tree,
            transport,
            limits,
            order,
            current: String::new(),
            sets: Vec::new(),
            warnings: Vec::new(),
            version: None,
        };
        store.restore_state();
        store
    }

    fn restore_state(&mut self) {
        let data = match reassemble(&self.transport, &self.limits) {
            Ok(Reassembly::Absent) => return,
            Ok(Reassembly::Complete(data)) => data,
            Ok(Reassembly::LengthMismatch {
                data,
                declared,
                actual,
            }) => {
                self.warn(StoreWarning::LengthMismatch { declared, actual });
                data
            }
            Err(ReassemblyError::MalformedHeader(header)) => {
                self.warn(StoreWarning::MalformedHeader { header });
                return;
            }
            Err(ReassemblyError::MissingSlot(index)) => {
                self.warn(StoreWarning::MissingSlot { index });
                return;
            }
            Err(ReassemblyError::Transport(e)) => {
                self.warn(StoreWarning::SlotReadFailed {
                    message: e.to_string(),
                });
                return;
            }
        };

        debug!(length = data.len(), "restoring working sets");

        let mut found = Vec::new();
        let (current, mut sets) = format::parse(&data, self.tree, &mut found);
        for warning in found {
            self.warn(warning);
        }

        sets.sort_by(|a, b| self.order.compare(a, b));
        self.current = current;
        self.sets = sets;
        self.version = Some(StateVersion::from_serialized(&data));
    }

    /// Serialize the whole collection and rewrite the slots.
    ///
    /// Either every required slot is written and the rest expired, or (when
    /// the state does not fit) nothing is touched.
    pub fn save(&mut self) -> Result<SaveReport, StoreError> {
        let mut found = Vec::new();
        let data = format::serialize(&self.current, &self.sets, self.tree, &mut found);
        for warning in found {
            self.warn(warning);
        }

        let chunks = match chunk(&data, &self.limits) {
            Ok(chunks) => chunks,
            Err(e) => {
                warn!(length = data.len(), "working sets not saved: {e}");
                return Err(e.into());
            }
        };

        for (i, payload) in chunks.iter().enumerate() {
            debug!(slot = i + 1, "saving data in slot: {payload}");
            self.transport.write_slot(i + 1, payload, self.limits.ttl)?;
        }

        // Stale continuations past the new end must not be read back.
        let mut slots_expired = 0;
        for index in chunks.len() + 1..=self.limits.max_slots {
            self.transport.expire_slot(index)?;
            slots_expired += 1;
        }

        let version = StateVersion::from_serialized(&data);
        self.version = Some(version.clone());

        Ok(SaveReport {
            version,
            length: data.len(),
            slots_written: chunks.len(),
            slots_expired,
        })
    }

    /// Add a set and save. Returns `Ok(false)` without saving if a set with
    /// the same name exists.
    pub fn add_working_set(&mut self, ws: WorkingSet) -> Result<bool, StoreError> {
        if self.get_working_set(&ws.name).is_some() {
            return Ok(false);
        }
        self.insert_sorted(ws);
        self.save()?;
        Ok(true)
    }

    /// Remove the set named `name` (if any) and save.
    pub fn remove_working_set(&mut self, name: &str) -> Result<Option<WorkingSet>, StoreError> {
        let pos = self.sets.iter().position(|ws| ws.name == name);
        let removed = pos.map(|pos| self.sets.remove(pos));
        self.save()?;
        Ok(removed)
    }

    /// Replace the set with the same name (adding it if absent) and save.
    pub fn working_set_changed(&mut self, ws: WorkingSet) -> Result<(), StoreError> {
        self.sets.retain(|existing| existing.name != ws.name);
        self.insert_sorted(ws);
        self.save()?;
        Ok(())
    }

    pub fn set_current_working_set(&mut self, name: impl Into<String>) -> Result<(), StoreError> {
        self.current = name.into();
        self.save()?;
        Ok(())
    }

    pub fn current_working_set(&self) -> &str {
        &self.current
    }

    pub fn get_working_set(&self, name: &str) -> Option<&WorkingSet> {
        self.sets.iter().find(|ws| ws.name == name)
    }

    pub fn working_sets(&self) -> &[WorkingSet] {
        &self.sets
    }

    pub fn create_working_set(
        &self,
        name: impl Into<String>,
        elements: Vec<ResourceRef>,
    ) -> WorkingSet {
        WorkingSet::new(name, elements)
    }

    pub fn tree(&self) -> &'t R {
        self.tree
    }

    pub fn limits(&self) -> &SlotLimits {
        &self.limits
    }

    /// Version of the state last restored or saved, if any.
    pub fn state_version(&self) -> Option<&StateVersion> {
        self.version.as_ref()
    }

    pub fn warnings(&self) -> &[StoreWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<StoreWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    fn insert_sorted(&mut self, ws: WorkingSet) {
        let pos = self
            .sets
            .partition_point(|existing| self.order.compare(existing, &ws).is_le());
        self.sets.insert(pos, ws);
    }

    fn warn(&mut self, warning: StoreWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }
}
