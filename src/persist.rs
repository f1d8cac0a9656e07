//! Persisted form of domains and bit-sets.
//!
//! A domain is written as the sequence of its elements. A bit-set is written
//! as `{ "domain": [...], "members": [...] }` with members in domain order.
//! Reading re-validates both: duplicate domain elements and foreign members
//! are rejected.
//!
//! Deserialization builds a fresh domain, equal to but not shared with the
//! original; [`DomainBitSet::rebind`] restores sharing.

use std::sync::Arc;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::compact::CompactSet;
use crate::dispatch::DomainSet;
use crate::domain::{Domain, Element};
use crate::general::GeneralSet;
use crate::set::DomainBitSet;

impl<T: Element + Serialize> Serialize for Domain<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Element + Deserialize<'de>> Deserialize<'de> for Domain<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Domain::new(elements).map_err(de::Error::custom)
    }
}

#[derive(serde::Deserialize)]
#[serde(bound(deserialize = "T: Element + Deserialize<'de>"))]
#[serde(deny_unknown_fields)]
struct Persisted<T> {
    domain: Domain<T>,
    members: Vec<T>,
}

fn serialize_set<T, B, S>(set: &B, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Element + Serialize,
    B: DomainBitSet<T>,
    S: Serializer,
{
    let members: Vec<&T> = set.iter().collect();
    let mut state = serializer.serialize_struct("DomainBitSet", 2)?;
    state.serialize_field("domain", &**set.domain())?;
    state.serialize_field("members", &members)?;
    state.end()
}

fn deserialize_set<'de, T, B, D>(deserializer: D) -> Result<B, D::Error>
where
    T: Element + Deserialize<'de>,
    B: DomainBitSet<T>,
    D: Deserializer<'de>,
{
    let Persisted { domain, members } = Persisted::<T>::deserialize(deserializer)?;
    B::from_elements(Arc::new(domain), members).map_err(de::Error::custom)
}

macro_rules! persisted {
    ($set:ident) => {
        impl<T: Element + Serialize> Serialize for $set<T> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serialize_set::<T, Self, S>(self, serializer)
            }
        }

        impl<'de, T: Element + Deserialize<'de>> Deserialize<'de> for $set<T> {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_set::<T, Self, D>(deserializer)
            }
        }
    };
}

persisted!(CompactSet);
persisted!(GeneralSet);
persisted!(DomainSet);
