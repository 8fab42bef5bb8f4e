use std::sync::Arc;

use crate::error::Error;

#[derive(Eq, PartialEq, Debug)]
pub enum PromiseState {
    Empty,
    Deferred,
    Resolved,
    Rejected,
}

/// Cell for a value that arrives asynchronously. `Deferred` carries an
/// identifying token so a resolution can be matched against the request
/// that is still current.
#[derive(Clone, Debug)]
pub enum Promise<T, D = (), E = Arc<Error>> {
    Empty,
    Deferred(D),
    Resolved(T),
    Rejected(E),
}

impl<T, D, E> Promise<T, D, E> {
    pub fn state(&self) -> PromiseState {
        match self {
            Self::Empty => PromiseState::Empty,
            Self::Deferred(_) => PromiseState::Deferred,
            Self::Resolved(_) => PromiseState::Resolved,
            Self::Rejected(_) => PromiseState::Rejected,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn is_deferred(&self, def: &D) -> bool
    where
        D: PartialEq,
    {
        matches!(self, Self::Deferred(d) if d == def)
    }

    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(val) => Some(val),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Rejected(err) => Some(err),
            _ => None,
        }
    }

    pub fn defer(&mut self, def: D) {
        *self = Self::Deferred(def);
    }

    pub fn resolve(&mut self, val: T) {
        *self = Self::Resolved(val);
    }

    pub fn reject(&mut self, err: E) {
        *self = Self::Rejected(err);
    }

    pub fn resolve_or_reject(&mut self, res: Result<T, E>) {
        *self = match res {
            Ok(ok) => Self::Resolved(ok),
            Err(err) => Self::Rejected(err),
        };
    }
}

impl<T, D, E> Default for Promise<T, D, E> {
    fn default() -> Self {
        Self::Empty
    }
}
