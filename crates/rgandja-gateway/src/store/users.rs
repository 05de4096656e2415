use chrono::{DateTime, NaiveDate, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use rgandja_core::error::{Result, RgandjaError};

use super::normalize_email;
use crate::policy::LicensePlan;

#[derive(Debug, Clone)]
pub struct UserRecord {
    pub email: String,
    pub plan: LicensePlan,
    pub expires_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    salt: String,
    password_digest: String,
}

impl UserRecord {
    pub fn new(email: &str, password: &str, plan: LicensePlan, expires_on: NaiveDate) -> Self {
        let salt = uuid::Uuid::new_v4().simple().to_string();
        let password_digest = digest(&salt, password);
        Self {
            email: normalize_email(email),
            plan,
            expires_on,
            created_at: Utc::now(),
            salt,
            password_digest,
        }
    }

    pub fn verify_password(&self, password: &str) -> bool {
        let candidate = digest(&self.salt, password);
        candidate
            .as_bytes()
            .ct_eq(self.password_digest.as_bytes())
            .into()
    }
}

/// Chained SHA-256 rounds over the salted password.
const DIGEST_ROUNDS: u32 = 10_000;

fn digest(salt: &str, password: &str) -> String {
    stretched_digest(salt, password, DIGEST_ROUNDS)
}

fn stretched_digest(salt: &str, password: &str, rounds: u32) -> String {
    let mut state = Sha256::new()
        .chain_update(salt.as_bytes())
        .chain_update(b":")
        .chain_update(password.as_bytes())
        .finalize();
    for _ in 1..rounds {
        state = Sha256::new()
            .chain_update(state)
            .chain_update(salt.as_bytes())
            .chain_update(password.as_bytes())
            .finalize();
    }
    hex::encode(state)
}

pub trait UserStore: Send + Sync {
    /// Insert if absent; an existing email is a conflict.
    fn insert(&self, user: UserRecord) -> Result<()>;
    fn get(&self, email: &str) -> Option<UserRecord>;
    /// Returns the updated record.
    fn set_plan(&self, email: &str, plan: LicensePlan, expires_on: NaiveDate) -> Result<UserRecord>;
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, UserRecord>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn insert(&self, user: UserRecord) -> Result<()> {
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(RgandjaError::Conflict("utente già esistente".into())),
            Entry::Vacant(v) => {
                v.insert(user);
                Ok(())
            }
        }
    }

    fn get(&self, email: &str) -> Option<UserRecord> {
        self.users.get(&normalize_email(email)).map(|u| u.value().clone())
    }

    fn set_plan(&self, email: &str, plan: LicensePlan, expires_on: NaiveDate) -> Result<UserRecord> {
        let mut user = self
            .users
            .get_mut(&normalize_email(email))
            .ok_or_else(|| RgandjaError::NotFound("utente non trovato".into()))?;
        user.plan = plan;
        user.expires_on = expires_on;
        Ok(user.value().clone())
    }
}
