//! Scripting context: the contextual roles a condition is evaluated against.

use tracing::trace;

use crate::error::{EvalError, EvalResult};
use crate::ids::ObjectId;
use crate::object::Object;
use crate::universe::Universe;

/// How missing context roles are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvalMode {
    /// Turn processing. A missing role is a non-match.
    #[default]
    Lenient,
    /// Script validation. A missing role is an `EvalError`.
    Strict,
}

/// Read-only bundle of the objects a condition may refer to.
///
/// Contexts are cheap to copy. Deriving a context for a subcondition keeps
/// `source`, `target` and `root_candidate` and only rebinds the local
/// candidate. `branch` identifies the position of the node being evaluated
/// among combinator siblings, so stochastic nodes with the same script text
/// draw independently.
#[derive(Debug, Clone, Copy)]
pub struct ScriptingContext<'a> {
    pub universe: &'a Universe,
    source: Option<ObjectId>,
    target: Option<ObjectId>,
    root_candidate: Option<ObjectId>,
    local_candidate: Option<ObjectId>,
    mode: EvalMode,
    branch: u64,
}

/// Which contextual role an accessor resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Source,
    Target,
    RootCandidate,
    LocalCandidate,
}

impl<'a> ScriptingContext<'a> {
    /// A top-level context with no roles bound.
    pub fn new(universe: &'a Universe) -> Self {
        Self {
            universe,
            source: None,
            target: None,
            root_candidate: None,
            local_candidate: None,
            mode: EvalMode::default(),
            branch: 0,
        }
    }

    pub fn with_source(mut self, source: ObjectId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_target(mut self, target: ObjectId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Context for testing `candidate`.
    ///
    /// The root candidate stays fixed once bound; a context without one binds
    /// `candidate` as the root, which is how a new top-level evaluation begins.
    pub fn with_local_candidate(&self, candidate: ObjectId) -> Self {
        Self {
            root_candidate: self.root_candidate.or(Some(candidate)),
            local_candidate: Some(candidate),
            ..*self
        }
    }

    /// Context for the `index`th child of a combinator.
    pub(crate) fn child(&self, index: usize) -> Self {
        // FNV-1a step over the child index.
        let branch = (self.branch ^ (index as u64 + 1)).wrapping_mul(0x0000_0100_0000_01b3);
        Self { branch, ..*self }
    }

    /// Position of the current node among combinator siblings.
    pub(crate) fn branch(&self) -> u64 {
        self.branch
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn source_id(&self) -> Option<ObjectId> {
        self.source
    }

    pub fn target_id(&self) -> Option<ObjectId> {
        self.target
    }

    pub fn root_candidate_id(&self) -> Option<ObjectId> {
        self.root_candidate
    }

    pub fn local_candidate_id(&self) -> Option<ObjectId> {
        self.local_candidate
    }

    pub fn current_turn(&self) -> i32 {
        self.universe.current_turn
    }

    /// The source object, for the named condition.
    ///
    /// `Ok(None)` means the role is unavailable and the caller should fail
    /// closed: either lenient mode with no source bound, or a bound id that
    /// names no object.
    pub fn source(&self, condition: &'static str) -> EvalResult<Option<&'a Object>> {
        self.resolve(Role::Source, condition)
    }

    pub fn target(&self, condition: &'static str) -> EvalResult<Option<&'a Object>> {
        self.resolve(Role::Target, condition)
    }

    pub fn root_candidate(&self, condition: &'static str) -> EvalResult<Option<&'a Object>> {
        self.resolve(Role::RootCandidate, condition)
    }

    pub fn local_candidate(&self, condition: &'static str) -> EvalResult<Option<&'a Object>> {
        self.resolve(Role::LocalCandidate, condition)
    }

    fn resolve(&self, role: Role, condition: &'static str) -> EvalResult<Option<&'a Object>> {
        let id = match role {
            Role::Source => self.source,
            Role::Target => self.target,
            Role::RootCandidate => self.root_candidate,
            Role::LocalCandidate => self.local_candidate,
        };
        let Some(id) = id else {
            if self.mode == EvalMode::Strict {
                return Err(match role {
                    Role::Source => EvalError::MissingSource { condition },
                    Role::Target => EvalError::MissingTarget { condition },
                    Role::RootCandidate => EvalError::MissingRootCandidate { condition },
                    Role::LocalCandidate => EvalError::MissingLocalCandidate { condition },
                });
            }
            trace!(condition, ?role, "context role not bound, failing closed");
            return Ok(None);
        };
        let object = self.universe.object(id);
        if object.is_none() {
            trace!(condition, ?role, object = %id, "context role names no object");
        }
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::universe::UniverseBuilder;

    #[test]
    fn test_root_binds_once() {
        let mut builder = UniverseBuilder::new();
        let a = builder.system("A", 0.0, 0.0);
        let b = builder.system("B", 10.0, 0.0);
        let universe = builder.build();

        let top = ScriptingContext::new(&universe);
        let outer = top.with_local_candidate(a);
        assert_eq!(outer.root_candidate_id(), Some(a));

        let inner = outer.with_local_candidate(b);
        assert_eq!(inner.local_candidate_id(), Some(b));
        assert_eq!(
            inner.root_candidate_id(),
            Some(a),
            "root candidate must survive descent into subconditions"
        );
    }

    #[test]
    fn test_child_branches_are_distinct_and_stable() {
        let universe = UniverseBuilder::new().build();
        let top = ScriptingContext::new(&universe);
        assert_ne!(top.child(0).branch(), top.child(1).branch());
        assert_ne!(top.child(0).branch(), top.child(0).child(0).branch());
        assert_eq!(top.child(1).branch(), top.child(1).branch());
        assert_eq!(
            top.child(2).with_local_candidate(ObjectId(3)).branch(),
            top.child(2).branch(),
            "rebinding the candidate keeps the branch"
        );
    }

    #[test]
    fn test_missing_source_lenient_vs_strict() {
        let universe = UniverseBuilder::new().build();
        let lenient = ScriptingContext::new(&universe);
        assert_eq!(lenient.source("Source"), Ok(None));

        let strict = lenient.with_mode(EvalMode::Strict);
        assert_eq!(
            strict.source("Source"),
            Err(EvalError::MissingSource { condition: "Source" })
        );
    }

    #[test]
    fn test_dangling_role_is_not_an_error() {
        let universe = UniverseBuilder::new().build();
        let strict = ScriptingContext::new(&universe)
            .with_mode(EvalMode::Strict)
            .with_target(ObjectId(404));
        assert_eq!(strict.target("Target"), Ok(None));
    }
}
