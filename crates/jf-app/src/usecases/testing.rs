//! Hand-written doubles shared by the use case tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use jf_core::catalog::{BillingPeriod, Tier};
use jf_core::ports::{ClockPort, RegistrationSnapshotPort};
use jf_core::registration::{
    AccountInfo, AddressInfo, LegalConsent, PaymentInfo, PersonalInfo, RegistrationData,
};
use jf_core::security::SecretText;

use crate::usecases::registration::RegistrationStore;

#[derive(Default)]
pub struct MemorySnapshot {
    pub saved: Mutex<Option<RegistrationData>>,
}

#[async_trait]
impl RegistrationSnapshotPort for MemorySnapshot {
    async fn load(&self) -> anyhow::Result<Option<RegistrationData>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    async fn save(&self, data: &RegistrationData) -> anyhow::Result<()> {
        *self.saved.lock().unwrap() = Some(data.clone());
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        *self.saved.lock().unwrap() = None;
        Ok(())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2026-10-16, noon UTC.
    pub fn october_2026() -> Self {
        Self(Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap())
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn gold_tier() -> Tier {
    Tier {
        id: "gold".into(),
        name: "Gold".into(),
        price: 49.0,
        billing_period: BillingPeriod::Month,
        features: vec!["24/7 access".into(), "Group classes".into()],
        access_hours: Some("24/7".into()),
    }
}

pub fn memory_store() -> (Arc<RegistrationStore>, Arc<MemorySnapshot>) {
    let snapshot = Arc::new(MemorySnapshot::default());
    let store = Arc::new(RegistrationStore::new(snapshot.clone()));
    (store, snapshot)
}

/// Data that passes every step schema and the composite schema.
pub fn complete_data() -> RegistrationData {
    RegistrationData {
        selected_tier: Some(gold_tier()),
        account: AccountInfo {
            email: "ada@example.com".into(),
            password: SecretText::new("Sup3rSecret"),
            confirm_password: SecretText::new("Sup3rSecret"),
        },
        personal: PersonalInfo {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: "+61412345678".into(),
            date_of_birth: "1990-12-10".into(),
        },
        address: AddressInfo {
            street: "12 Analytical Way".into(),
            apt: None,
            city: "Sydney".into(),
            state: "NSW".into(),
            zip: "2000".into(),
        },
        health_conditions: vec!["none".into()],
        requires_medical_clearance: false,
        payment: PaymentInfo {
            card_number: "4242 4242 4242 4242".into(),
            expiry: "12/30".into(),
            cvv: "123".into(),
            billing_zip: "2000".into(),
        },
        legal: LegalConsent {
            agree_terms: true,
            agree_waiver: true,
            marketing_opt_in: false,
        },
    }
}
