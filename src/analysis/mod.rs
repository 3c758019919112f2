//! Rule-table reasoning over a frozen posture: attack-path hypotheses and
//! remediation templates. Adding a pattern means adding a table entry;
//! aggregation and scoring are untouched.

pub mod attack_path;
pub mod remediation;

pub use attack_path::{AttackPath, AttackStep};
pub use remediation::{Remediation, NAMESPACE_PLACEHOLDER};
