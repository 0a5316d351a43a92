use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use ai_core::MemoryValue;

use crate::TargetWorldView;

type TargetTest<W> = dyn Fn(&W, <W as ai_core::WorldView>::Agent) -> bool;

/// Snapshot of nearby agents taken by a sensor, plus a memoized targetability test.
///
/// Every query only yields candidates for which the test holds; being listed is not enough. The
/// test runs at most once per candidate for the lifetime of the snapshot, and clones of the
/// snapshot share the memo. Sensors replace the snapshot on every scan.
pub struct LivingTargetCache<W>
where
    W: TargetWorldView + 'static,
{
    candidates: Rc<[W::Agent]>,
    test: Rc<TargetTest<W>>,
    memo: Rc<RefCell<BTreeMap<W::Agent, bool>>>,
}

impl<W> LivingTargetCache<W>
where
    W: TargetWorldView + 'static,
{
    pub fn new(
        candidates: impl IntoIterator<Item = W::Agent>,
        test: impl Fn(&W, W::Agent) -> bool + 'static,
    ) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
            test: Rc::new(test),
            memo: Rc::new(RefCell::new(BTreeMap::new())),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), |_, _| false)
    }

    /// The raw candidate list in sensor order, including agents that fail the test.
    pub fn candidates(&self) -> &[W::Agent] {
        &self.candidates
    }

    /// Number of test evaluations performed on this snapshot so far.
    pub fn evaluated(&self) -> usize {
        self.memo.borrow().len()
    }

    fn is_valid(&self, world: &W, agent: W::Agent) -> bool {
        let cached = self.memo.borrow().get(&agent).copied();
        if let Some(valid) = cached {
            return valid;
        }
        let valid = (self.test)(world, agent);
        self.memo.borrow_mut().insert(agent, valid);
        valid
    }

    /// Valid candidates in sensor order, evaluated lazily.
    pub fn iter<'a>(&'a self, world: &'a W) -> impl Iterator<Item = W::Agent> + 'a {
        self.candidates
            .iter()
            .copied()
            .filter(move |agent| self.is_valid(world, *agent))
    }

    pub fn find_first(
        &self,
        world: &W,
        mut predicate: impl FnMut(W::Agent) -> bool,
    ) -> Option<W::Agent> {
        self.candidates
            .iter()
            .copied()
            .find(|agent| predicate(*agent) && self.is_valid(world, *agent))
    }

    pub fn find_all(&self, world: &W, mut predicate: impl FnMut(W::Agent) -> bool) -> Vec<W::Agent> {
        self.iter(world).filter(|agent| predicate(*agent)).collect()
    }

    pub fn contains(&self, world: &W, agent: W::Agent) -> bool {
        self.candidates.contains(&agent) && self.is_valid(world, agent)
    }

    pub fn any_match(&self, world: &W, mut predicate: impl FnMut(W::Agent) -> bool) -> bool {
        self.find_first(world, &mut predicate).is_some()
    }
}

impl<W> Clone for LivingTargetCache<W>
where
    W: TargetWorldView + 'static,
{
    fn clone(&self) -> Self {
        Self {
            candidates: Rc::clone(&self.candidates),
            test: Rc::clone(&self.test),
            memo: Rc::clone(&self.memo),
        }
    }
}

impl<W> std::fmt::Debug for LivingTargetCache<W>
where
    W: TargetWorldView + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LivingTargetCache")
            .field("candidates", &self.candidates)
            .field("memo", &self.memo.borrow())
            .finish()
    }
}

// A snapshot with no candidates is still a scan result.
impl<W> MemoryValue for LivingTargetCache<W> where W: TargetWorldView + 'static {}
