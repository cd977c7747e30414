//! Pure attendance statistics over the three collections. Nothing here reads
//! or writes the store; results are point-in-time and recomputed per call.

use crate::model::{AttendanceRecord, AttendanceStatus, Member, Session};
use serde::Serialize;

/// Whether a LATE mark counts toward presence. The stored data keeps the
/// three-way status either way; this only affects rate math. Defaults to
/// counting PRESENT alone, which also folds explicit ABSENT marks into the
/// inferred-absent bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatePolicy {
    #[default]
    PresentOnly,
    LateCountsAsPresent,
}

impl LatePolicy {
    fn counts(self, status: AttendanceStatus) -> bool {
        match self {
            LatePolicy::PresentOnly => status == AttendanceStatus::Present,
            LatePolicy::LateCountsAsPresent => {
                matches!(status, AttendanceStatus::Present | AttendanceStatus::Late)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub session_id: String,
    pub total_members: usize,
    pub present_count: usize,
    pub absent_count: usize,
    pub attendance_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub member_id: String,
    pub total_sessions: usize,
    pub attended_count: usize,
    pub missed_count: usize,
    pub attendance_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub session_id: String,
    pub name: String,
    pub date: String,
    pub present_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_members: usize,
    pub active_members: usize,
    pub total_sessions: usize,
    pub overall_rate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_session: Option<SessionStats>,
    pub trend: Vec<TrendPoint>,
}

fn rate(numer: usize, denom: usize) -> u32 {
    if denom == 0 {
        return 0;
    }
    ((numer as f64 / denom as f64) * 100.0).round() as u32
}

fn counted_present(
    attendance: &[AttendanceRecord],
    session_id: &str,
    policy: LatePolicy,
) -> usize {
    attendance
        .iter()
        .filter(|a| a.session_id == session_id && policy.counts(a.status))
        .count()
}

/// Absence is inferred: anyone in the active roster without a counted mark
/// for the session is absent, whether or not an ABSENT record was stored.
pub fn session_stats(
    session_id: &str,
    members: &[Member],
    attendance: &[AttendanceRecord],
    policy: LatePolicy,
) -> SessionStats {
    let total_members = members.iter().filter(|m| m.is_active).count();
    let present_count = counted_present(attendance, session_id, policy);
    SessionStats {
        session_id: session_id.to_string(),
        total_members,
        present_count,
        absent_count: total_members.saturating_sub(present_count),
        attendance_rate: rate(present_count, total_members),
    }
}

/// The denominator is every session on record, whether or not the member was
/// active (or even created) when it ran.
pub fn member_stats(
    member_id: &str,
    sessions: &[Session],
    attendance: &[AttendanceRecord],
    policy: LatePolicy,
) -> MemberStats {
    let total_sessions = sessions.len();
    let attended_count = attendance
        .iter()
        .filter(|a| a.member_id == member_id && policy.counts(a.status))
        .count();
    MemberStats {
        member_id: member_id.to_string(),
        total_sessions,
        attended_count,
        missed_count: total_sessions.saturating_sub(attended_count),
        attendance_rate: rate(attended_count, total_sessions),
    }
}

/// System-wide aggregate: counted marks over (sessions x active members).
/// This is coarser than averaging per-session rates; a packed session and an
/// empty one do not weigh equally.
pub fn overall_rate(
    members: &[Member],
    sessions: &[Session],
    attendance: &[AttendanceRecord],
    policy: LatePolicy,
) -> u32 {
    let active_members = members.iter().filter(|m| m.is_active).count();
    let counted = attendance.iter().filter(|a| policy.counts(a.status)).count();
    rate(counted, sessions.len() * active_members)
}

/// The `limit` most recently created sessions (collection head first),
/// reversed into chronological order for charting.
pub fn trend_series(
    limit: usize,
    sessions: &[Session],
    attendance: &[AttendanceRecord],
    policy: LatePolicy,
) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = sessions
        .iter()
        .take(limit)
        .map(|s| TrendPoint {
            session_id: s.id.clone(),
            name: s.name.clone(),
            date: s.date.clone(),
            present_count: counted_present(attendance, &s.id, policy),
        })
        .collect();
    points.reverse();
    points
}

pub fn overview(
    members: &[Member],
    sessions: &[Session],
    attendance: &[AttendanceRecord],
    policy: LatePolicy,
) -> Overview {
    Overview {
        total_members: members.len(),
        active_members: members.iter().filter(|m| m.is_active).count(),
        total_sessions: sessions.len(),
        overall_rate: overall_rate(members, sessions, attendance, policy),
        last_session: sessions
            .first()
            .map(|s| session_stats(&s.id, members, attendance, policy)),
        trend: trend_series(5, sessions, attendance, policy),
    }
}
