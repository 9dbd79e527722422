//! Mutually exclusive attribute groups and default resolution.

use std::sync::Arc;

use tracing::trace;

use super::attribute::{AttributeInfo, AttributeKey};
use super::error::ConfigurationError;

/// Attributes that fill one logical slot. Setting one clears the others.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeGroup {
    name: Arc<str>,
    members: Vec<AttributeKey>,
    default_attribute: Option<AttributeKey>,
}

/// Priority of a default candidate. Higher wins; equal keeps the earlier one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Implicit,
    Absence,
    Explicit,
}

fn rank(attribute: &AttributeInfo) -> Rank {
    if attribute.has_explicit_default() {
        Rank::Explicit
    } else if attribute.defaults_to_absence() {
        Rank::Absence
    } else {
        Rank::Implicit
    }
}

impl AttributeGroup {
    /// Build a group from its members in declaration order, resolving the
    /// single default member.
    ///
    /// Required members and members with no default never become the
    /// default. Among the rest an explicit default beats a nullable member
    /// that defaults to absence, which beats any other implicit default.
    /// A second explicit default is an error.
    pub fn resolve<'a, I>(name: impl Into<Arc<str>>, members: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = &'a AttributeInfo>,
    {
        let name = name.into();
        let members: Vec<&AttributeInfo> = members.into_iter().collect();
        if members.is_empty() {
            return Err(ConfigurationError::EmptyGroup { group: name });
        }

        let mut candidate: Option<&AttributeInfo> = None;
        for &member in &members {
            if member.is_required() || !member.has_default() {
                continue;
            }
            let Some(current) = candidate else {
                trace!(group = %name, attribute = %member, "initial default candidate");
                candidate = Some(member);
                continue;
            };
            let (current_rank, member_rank) = (rank(current), rank(member));
            if current_rank == Rank::Explicit && member_rank == Rank::Explicit {
                return Err(ConfigurationError::ConflictingGroupDefaults {
                    group: name,
                    members: member_list(&members),
                });
            }
            if member_rank > current_rank {
                trace!(
                    group = %name,
                    from = %current,
                    to = %member,
                    "default candidate replaced"
                );
                candidate = Some(member);
            }
        }

        if let Some(default) = candidate.filter(|c| !c.default_value().is_usable()) {
            return Err(ConfigurationError::DefaultWithoutCode {
                group: name,
                attribute: Arc::from(default.field_name()),
            });
        }

        Ok(Self {
            name,
            members: members.iter().map(|m| m.key().clone()).collect(),
            default_attribute: candidate.map(|c| c.key().clone()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[AttributeKey] {
        &self.members
    }

    pub fn contains(&self, key: &AttributeKey) -> bool {
        self.members.contains(key)
    }

    /// The member `reset()` assigns its default to, if any.
    pub fn default_attribute(&self) -> Option<&AttributeKey> {
        self.default_attribute.as_ref()
    }

    /// A group with no default must be set explicitly before use.
    pub fn is_required(&self) -> bool {
        self.default_attribute.is_none()
    }

    /// Members other than `key`, i.e. the attributes setting `key` clears.
    pub fn siblings_of<'a>(&'a self, key: &'a AttributeKey) -> impl Iterator<Item = &'a AttributeKey> + 'a {
        self.members.iter().filter(move |m| *m != key)
    }
}

fn member_list(members: &[&AttributeInfo]) -> String {
    members
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
