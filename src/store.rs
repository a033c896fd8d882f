use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::HrError;
use crate::model::attendance::AttendanceRecord;
use crate::model::department::Department;
use crate::model::employee::{EmergencyContact, Employee};
use crate::model::leave::{LeaveBalance, LeaveRequest};
use crate::model::payroll::PayrollRecord;

pub const SNAPSHOT_VERSION: u32 = 1;

const SNAPSHOT_FILE: &str = "snapshot.json";

/// The full persisted form of the aggregate. The open-session map is not
/// part of the schema; it is rebuilt from records with an absent clock-out.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub payroll: Vec<PayrollRecord>,
    pub leave_requests: Vec<LeaveRequest>,
    pub leave_balances: Vec<LeaveBalance>,
}

/// Process-wide application state. The session controller is the only
/// writer of `attendance`/`payroll`; the directory is mutated only through
/// the explicit employee operations.
#[derive(Debug, Default)]
pub struct HrState {
    pub employees: Vec<Employee>,
    pub attendance: Vec<AttendanceRecord>,
    pub payroll: Vec<PayrollRecord>,
    pub leave_requests: Vec<LeaveRequest>,
    pub leave_balances: Vec<LeaveBalance>,
    /// employee id -> id of that employee's open attendance record.
    pub open_sessions: HashMap<String, String>,
}

impl HrState {
    /// First-run roster, matching the mock directory the service ships with.
    pub fn seeded() -> Self {
        let employees = vec![
            Employee {
                id: "EMP001".to_string(),
                name: "Sarah Jenkins".to_string(),
                email: "s.jenkins@pakque.hr".to_string(),
                phone: "+1 (555) 123-4567".to_string(),
                role: "Senior Developer".to_string(),
                department: Department::Engineering,
                hire_date: date(2022, 3, 15),
                emergency_contact: EmergencyContact {
                    name: "Robert Jenkins".to_string(),
                    phone: "+1 (555) 987-6543".to_string(),
                    relationship: "Spouse".to_string(),
                },
                hourly_rate: 65.0,
                avatar: None,
                is_active: true,
            },
            Employee {
                id: "EMP002".to_string(),
                name: "Michael Chen".to_string(),
                email: "m.chen@pakque.hr".to_string(),
                phone: "+1 (555) 234-5678".to_string(),
                role: "HR Manager".to_string(),
                department: Department::PeopleAndCulture,
                hire_date: date(2021, 11, 1),
                emergency_contact: EmergencyContact {
                    name: "Alice Chen".to_string(),
                    phone: "+1 (555) 876-5432".to_string(),
                    relationship: "Sister".to_string(),
                },
                hourly_rate: 55.0,
                avatar: None,
                is_active: true,
            },
            Employee {
                id: "EMP003".to_string(),
                name: "Jessica Williams".to_string(),
                email: "j.williams@pakque.hr".to_string(),
                phone: "+1 (555) 345-6789".to_string(),
                role: "Product Designer".to_string(),
                department: Department::Design,
                hire_date: date(2023, 1, 20),
                emergency_contact: EmergencyContact {
                    name: "Tom Williams".to_string(),
                    phone: "+1 (555) 765-4321".to_string(),
                    relationship: "Father".to_string(),
                },
                hourly_rate: 60.0,
                avatar: None,
                is_active: true,
            },
        ];

        let leave_balances = employees
            .iter()
            .map(|e| LeaveBalance::seeded(e.id.clone()))
            .collect();

        Self {
            employees,
            leave_balances,
            ..Self::default()
        }
    }

    pub fn employee(&self, id: &str) -> Result<&Employee, HrError> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| HrError::not_found("Employee not found"))
    }

    pub fn employee_mut(&mut self, id: &str) -> Result<&mut Employee, HrError> {
        self.employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| HrError::not_found("Employee not found"))
    }

    /// Next directory identifier: highest numeric `EMP` suffix plus one.
    pub fn next_employee_id(&self) -> String {
        let max = self
            .employees
            .iter()
            .filter_map(|e| e.id.strip_prefix("EMP"))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("EMP{:03}", max + 1)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            employees: self.employees.clone(),
            attendance: self.attendance.clone(),
            payroll: self.payroll.clone(),
            leave_requests: self.leave_requests.clone(),
            leave_balances: self.leave_balances.clone(),
        }
    }

    /// Rebuilds the in-memory aggregate from a snapshot, including the
    /// open-session map. Fails if the snapshot claims a schema version this
    /// build does not understand, or if the scan finds two open records for
    /// one employee.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, HrError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(HrError::storage(format!(
                "unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        let mut open_sessions = HashMap::new();
        for record in &snapshot.attendance {
            if record.clock_out.is_none()
                && open_sessions
                    .insert(record.employee_id.clone(), record.id.clone())
                    .is_some()
            {
                return Err(HrError::invalid_state(format!(
                    "employee {} has more than one open attendance record",
                    record.employee_id
                )));
            }
        }

        Ok(Self {
            employees: snapshot.employees,
            attendance: snapshot.attendance,
            payroll: snapshot.payroll,
            leave_requests: snapshot.leave_requests,
            leave_balances: snapshot.leave_balances,
            open_sessions,
        })
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Snapshot-backed store: one `RwLock<HrState>` plus the file it is
/// persisted to. Handlers hold the write guard across a whole mutation and
/// call [`HrStore::persist`] before releasing it, so the file on disk never
/// gets ahead of what a reader can observe.
#[derive(Debug)]
pub struct HrStore {
    state: RwLock<HrState>,
    path: PathBuf,
}

impl HrStore {
    /// Opens the store under `data_dir`, loading `snapshot.json` when it
    /// exists and seeding the mock directory otherwise. Seeding writes the
    /// first snapshot immediately so a broken data dir fails at startup,
    /// not on the first request.
    pub fn open(data_dir: &Path) -> Result<Self, HrError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(SNAPSHOT_FILE);

        let (state, fresh) = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&raw)?;
            let state = HrState::from_snapshot(snapshot)?;
            info!(
                employees = state.employees.len(),
                attendance = state.attendance.len(),
                payroll = state.payroll.len(),
                "Loaded snapshot"
            );
            (state, false)
        } else {
            info!("No snapshot found, seeding mock directory");
            (HrState::seeded(), true)
        };

        let store = Self {
            state: RwLock::new(state),
            path,
        };
        if fresh {
            let state = store.read()?;
            store.persist(&state)?;
        }
        Ok(store)
    }

    pub fn read(&self) -> Result<RwLockReadGuard<'_, HrState>, HrError> {
        Ok(self.state.read()?)
    }

    pub fn write(&self) -> Result<RwLockWriteGuard<'_, HrState>, HrError> {
        Ok(self.state.write()?)
    }

    /// Serializes the whole aggregate and fully replaces the snapshot file.
    pub fn persist(&self, state: &HrState) -> Result<(), HrError> {
        let json = serde_json::to_string_pretty(&state.snapshot())?;
        fs::write(&self.path, json).map_err(|e| {
            error!(error = %e, path = %self.path.display(), "Failed to write snapshot");
            HrError::from(e)
        })
    }
}
