use crate::{Error, Result};

use std::any::Any;
use std::fmt;

/// A callback run against an instance of the described type.
pub type Callback = fn(&mut dyn Any);

/// Borrows an embedded ancestor out of an instance of a derived type.
pub type Projection = fn(&mut dyn Any) -> Option<&mut dyn Any>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    PreInsert,
    PostInsert,
    PreUpdate,
    PostUpdate,
    PreDelete,
    PostDelete,
    PreFetch,
    PostFetch,
    PreSave,
    PostSave,
}

impl LifecyclePhase {
    pub const ALL: [LifecyclePhase; 10] = [
        LifecyclePhase::PreInsert,
        LifecyclePhase::PostInsert,
        LifecyclePhase::PreUpdate,
        LifecyclePhase::PostUpdate,
        LifecyclePhase::PreDelete,
        LifecyclePhase::PostDelete,
        LifecyclePhase::PreFetch,
        LifecyclePhase::PostFetch,
        LifecyclePhase::PreSave,
        LifecyclePhase::PostSave,
    ];
}

/// A method registered to run at one or more lifecycle phases.
#[derive(Clone)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub phases: Vec<LifecyclePhase>,
    callback: Callback,

    /// Applied in order to reach the receiver of an inherited method
    projections: Vec<Projection>,
}

impl MethodDescriptor {
    pub fn new(name: &'static str, phases: &[LifecyclePhase], callback: Callback) -> MethodDescriptor {
        MethodDescriptor {
            name,
            phases: phases.to_vec(),
            callback,
            projections: vec![],
        }
    }

    pub fn is_registered(&self, phase: LifecyclePhase) -> bool {
        self.phases.contains(&phase)
    }

    /// True if the method was declared on an ancestor.
    pub fn is_inherited(&self) -> bool {
        !self.projections.is_empty()
    }

    /// Runs the method against `target`, an instance of the type whose
    /// descriptor lists this method.
    pub fn invoke(&self, target: &mut dyn Any) -> Result<()> {
        let mut target = target;
        for project in &self.projections {
            target = match project(target) {
                Some(receiver) => receiver,
                None => {
                    return Err(Error::configuration(format!(
                        "cannot reach the receiver of lifecycle method `{}`",
                        self.name
                    )))
                }
            };
        }

        (self.callback)(target);
        Ok(())
    }

    pub(super) fn inherited(&self, project: Projection) -> MethodDescriptor {
        let mut projections = Vec::with_capacity(self.projections.len() + 1);
        projections.push(project);
        projections.extend_from_slice(&self.projections);

        MethodDescriptor {
            name: self.name,
            phases: self.phases.clone(),
            callback: self.callback,
            projections,
        }
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("phases", &self.phases)
            .field("inherited", &self.is_inherited())
            .finish()
    }
}
