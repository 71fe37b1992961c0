/// Shortcut Store: load/save/reset over a key-value storage area with change
/// notification shared by every open surface.

use crate::error::ShortcutError;
use crate::shortcut::DefaultSet;
use crate::storage::{STORAGE_KEY, ShortcutList};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Called with the key and its new value after a write completes
pub type AreaListener = Box<dyn Fn(&str, Option<Value>)>;

/// A key-value storage backend.
///
/// Implementations must deliver a write to subscribers only after the write
/// has completed, and exactly once per write.
#[allow(async_fn_in_trait)]
pub trait StorageArea {
    async fn get(&self, key: &str) -> Result<Option<Value>, ShortcutError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), ShortcutError>;

    fn subscribe(&self, listener: AreaListener);
}

/// In-process storage area. Clones share the same data and listeners,
/// which makes two clones behave like two surfaces over one profile.
#[derive(Clone, Default)]
pub struct MemoryArea {
    data: Rc<RefCell<HashMap<String, Value>>>,
    listeners: Rc<RefCell<Vec<AreaListener>>>,
}

impl MemoryArea {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageArea for MemoryArea {
    async fn get(&self, key: &str) -> Result<Option<Value>, ShortcutError> {
        Ok(self.data.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ShortcutError> {
        self.data.borrow_mut().insert(key.to_string(), value.clone());
        for listener in self.listeners.borrow().iter() {
            listener(key, Some(value.clone()));
        }
        Ok(())
    }

    fn subscribe(&self, listener: AreaListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

pub struct ShortcutStore<A: StorageArea> {
    area: A,
}

impl<A: StorageArea> ShortcutStore<A> {
    pub fn new(area: A) -> Self {
        ShortcutStore { area }
    }

    /// Persisted list, or the standard defaults when nothing is stored yet
    pub async fn load(&self) -> Result<ShortcutList, ShortcutError> {
        let raw = self.area.get(STORAGE_KEY).await?;
        ShortcutList::from_stored(raw)
    }

    pub async fn save(&self, list: &ShortcutList) -> Result<(), ShortcutError> {
        self.area.set(STORAGE_KEY, list.to_stored()?).await?;
        log::debug!("Saved {} shortcuts", list.len());
        Ok(())
    }

    /// Overwrite the list with a built-in set and return it
    pub async fn reset(&self, set: DefaultSet) -> Result<ShortcutList, ShortcutError> {
        let list = ShortcutList::defaults(set);
        self.save(&list).await?;
        Ok(list)
    }

    /// Write the standard defaults if the key is absent. Returns whether it wrote.
    pub async fn seed_defaults(&self) -> Result<bool, ShortcutError> {
        match self.area.get(STORAGE_KEY).await? {
            Some(value) if !value.is_null() => Ok(false),
            _ => {
                self.reset(DefaultSet::Standard).await?;
                log::info!("Seeded default shortcuts");
                Ok(true)
            }
        }
    }

    /// Register a subscriber for every persisted change of the list
    pub fn on_change(&self, callback: impl Fn(&ShortcutList) + 'static) {
        self.area.subscribe(Box::new(move |key: &str, value: Option<Value>| {
            if key != STORAGE_KEY {
                return;
            }
            match ShortcutList::from_stored(value) {
                Ok(list) => callback(&list),
                Err(e) => log::error!("Ignoring unreadable shortcut change: {}", e),
            }
        }));
    }
}
