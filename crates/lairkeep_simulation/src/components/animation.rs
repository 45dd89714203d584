//! Animation sink: флаги и one-shot триггеры для presentation слоя
//!
//! Симуляция только пишет сюда, как это рендерится — не её забота.
//! Sink опционален: без него side effects просто пропускаются.

use bevy::prelude::*;
use std::collections::HashMap;

/// Булевые флаги аниматора
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimFlag {
    Attacking,
}

/// One-shot триггеры аниматора
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimTrigger {
    Attack,
    Die,
}

#[derive(Component, Debug, Clone, Default)]
pub struct AnimationSink {
    flags: HashMap<AnimFlag, bool>,
    triggers: Vec<AnimTrigger>,
    /// Какие триггеры есть в графе аниматора (None = все)
    supported: Option<Vec<AnimTrigger>>,
}

impl AnimationSink {
    /// Sink, поддерживающий только перечисленные триггеры
    pub fn with_triggers(supported: impl Into<Vec<AnimTrigger>>) -> Self {
        Self {
            supported: Some(supported.into()),
            ..default()
        }
    }

    pub fn set_flag(&mut self, flag: AnimFlag, value: bool) {
        self.flags.insert(flag, value);
    }

    pub fn flag(&self, flag: AnimFlag) -> bool {
        self.flags.get(&flag).copied().unwrap_or(false)
    }

    pub fn supports(&self, trigger: AnimTrigger) -> bool {
        self.supported
            .as_ref()
            .map_or(true, |list| list.contains(&trigger))
    }

    /// false — триггер не поддерживается графом, ничего не поставлено
    pub fn fire(&mut self, trigger: AnimTrigger) -> bool {
        if !self.supports(trigger) {
            return false;
        }
        self.triggers.push(trigger);
        true
    }

    pub fn pending(&self) -> &[AnimTrigger] {
        &self.triggers
    }

    /// Presentation слой забирает накопленные триггеры
    pub fn drain_triggers(&mut self) -> Vec<AnimTrigger> {
        std::mem::take(&mut self.triggers)
    }
}
