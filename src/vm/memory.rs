//! The data segment: named scalar and array variables.
//!
//! Cells are stored at i32 width so flag updates see results wider than
//! the byte storage they will eventually land in.

use super::RuntimeError;
use crate::ast::{Declaration, VarType};
use log::debug;
use std::collections::HashMap;

/// Total cells available for variables.
pub const DATA_SIZE: usize = 700;

enum Slot {
    Scalar(i32),
    Array(Vec<i32>),
}

/// Storage for all declared variables, zero-initialized.
pub struct DataSegment {
    slots: HashMap<String, Slot>,
}

impl DataSegment {
    /// Lays out the declarations, failing when they exceed [`DATA_SIZE`].
    pub fn new(declarations: &[Declaration]) -> Result<Self, RuntimeError> {
        let mut slots = HashMap::new();
        let mut used = 0usize;
        for declaration in declarations {
            let (slot, cells) = match declaration.ty {
                VarType::Byte => (Slot::Scalar(0), 1),
                VarType::Array(size) => (Slot::Array(vec![0; size]), size),
            };
            used += cells;
            if used > DATA_SIZE {
                return Err(RuntimeError::OutOfMemory);
            }
            debug!("declared {} ({:?})", declaration.name, declaration.ty);
            slots.insert(declaration.name.clone(), slot);
        }
        Ok(DataSegment { slots })
    }

    pub fn load(&self, name: &str) -> Result<i32, RuntimeError> {
        match self.slots.get(name) {
            Some(Slot::Scalar(value)) => Ok(*value),
            Some(Slot::Array(_)) => Err(RuntimeError::NotAScalar(name.to_string())),
            None => Err(RuntimeError::Undefined(name.to_string())),
        }
    }

    pub fn store(&mut self, name: &str, value: i32) -> Result<(), RuntimeError> {
        match self.slots.get_mut(name) {
            Some(Slot::Scalar(cell)) => {
                *cell = value;
                Ok(())
            }
            Some(Slot::Array(_)) => Err(RuntimeError::NotAScalar(name.to_string())),
            None => Err(RuntimeError::Undefined(name.to_string())),
        }
    }

    pub fn load_element(&self, name: &str, index: usize) -> Result<i32, RuntimeError> {
        match self.slots.get(name) {
            Some(Slot::Array(cells)) => cells.get(index).copied().ok_or_else(|| {
                RuntimeError::IndexOutOfBounds {
                    name: name.to_string(),
                    index,
                    size: cells.len(),
                }
            }),
            Some(Slot::Scalar(_)) => Err(RuntimeError::NotAnArray(name.to_string())),
            None => Err(RuntimeError::Undefined(name.to_string())),
        }
    }

    pub fn store_element(
        &mut self,
        name: &str,
        index: usize,
        value: i32,
    ) -> Result<(), RuntimeError> {
        match self.slots.get_mut(name) {
            Some(Slot::Array(cells)) => {
                let size = cells.len();
                match cells.get_mut(index) {
                    Some(cell) => {
                        *cell = value;
                        Ok(())
                    }
                    None => Err(RuntimeError::IndexOutOfBounds {
                        name: name.to_string(),
                        index,
                        size,
                    }),
                }
            }
            Some(Slot::Scalar(_)) => Err(RuntimeError::NotAnArray(name.to_string())),
            None => Err(RuntimeError::Undefined(name.to_string())),
        }
    }
}
