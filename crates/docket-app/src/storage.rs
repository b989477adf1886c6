// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use std::collections::BTreeMap;

use crate::{FieldMap, ProfileRole};

pub const PROFILE_IMAGE_KEY: &str = "lawyerProfileImage";
pub const PLACEHOLDER_PROFILE_IMAGE: &str = "https://via.placeholder.com/40";
pub const USER_ROLE_KEY: &str = "userRole";
pub const EMAIL_KEY: &str = "email";
pub const PROFILE_FIELD_PREFIX: &str = "profile.";

/// Small key-value capability handed to whatever needs durable client state.
pub trait ClientStorage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process storage for tests and demo sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

pub fn load_profile_image<S: ClientStorage + ?Sized>(storage: &S) -> Result<String> {
    Ok(storage
        .get(PROFILE_IMAGE_KEY)?
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER_PROFILE_IMAGE.to_owned()))
}

pub fn store_profile_image<S: ClientStorage + ?Sized>(storage: &mut S, image: &str) -> Result<()> {
    if image.trim().is_empty() {
        bail!("profile image is empty -- pick a file before uploading");
    }
    storage.set(PROFILE_IMAGE_KEY, image)
}

/// Validates a completed profile against `role`'s fields and stores each
/// value under `profile.<field>`. Nothing is written when validation fails.
pub fn store_profile<S: ClientStorage + ?Sized>(
    storage: &mut S,
    role: ProfileRole,
    raw: &BTreeMap<String, String>,
) -> Result<FieldMap> {
    let schema = role.profile_schema();
    if let Some(unknown) = raw.keys().find(|name| schema.field(name).is_none()) {
        let expected: Vec<&str> = schema
            .fields()
            .iter()
            .map(|field| field.name.as_str())
            .collect();
        bail!(
            "{unknown:?} is not a {} profile field; expected one of: {}",
            role.as_str(),
            expected.join(", ")
        );
    }

    let fields = schema.parse_input(raw)?;
    schema.validate(&fields)?;
    for (name, value) in fields.iter().filter(|(_, value)| !value.is_blank()) {
        storage.set(&format!("{PROFILE_FIELD_PREFIX}{name}"), &value.display())?;
    }
    Ok(fields)
}

/// Stored profile values for `role` as `(label, value)` pairs in form order.
pub fn load_profile<S: ClientStorage + ?Sized>(
    storage: &S,
    role: ProfileRole,
) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    for field in role.profile_schema().fields() {
        if let Some(value) = storage.get(&format!("{PROFILE_FIELD_PREFIX}{}", field.name))? {
            entries.push((field.label.clone(), value));
        }
    }
    Ok(entries)
}

/// Who is signed in, as remembered between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionHints {
    pub role: Option<String>,
    pub email: Option<String>,
}

impl SessionHints {
    pub fn load<S: ClientStorage + ?Sized>(storage: &S) -> Result<Self> {
        Ok(Self {
            role: storage.get(USER_ROLE_KEY)?,
            email: storage.get(EMAIL_KEY)?,
        })
    }

    pub fn save<S: ClientStorage + ?Sized>(&self, storage: &mut S) -> Result<()> {
        if let Some(role) = &self.role {
            storage.set(USER_ROLE_KEY, role)?;
        }
        if let Some(email) = &self.email {
            storage.set(EMAIL_KEY, email)?;
        }
        Ok(())
    }

    pub fn profile_role(&self) -> Option<ProfileRole> {
        self.role.as_deref().and_then(ProfileRole::parse)
    }
}
