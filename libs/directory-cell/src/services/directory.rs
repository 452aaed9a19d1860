use chrono::NaiveDate;
use tracing::debug;

use shared_models::auth::User;

use crate::models::{
    Appointment, AppointmentStatus, AppointmentView, AppointmentsOverview, Dashboard, Doctor,
    DoctorView, DirectoryError, Hospital, QuickAction, SearchResults,
};
use crate::services::fixtures;

pub const NO_DOCTORS_MESSAGE: &str = "No doctors found matching your search.";
pub const NO_HOSPITALS_MESSAGE: &str = "No hospitals found matching your search.";
const DASHBOARD_UPCOMING_LIMIT: usize = 2;

pub const QUICK_ACTIONS: [QuickAction; 3] = [
    QuickAction {
        title: "Check Symptoms",
        description: "Use our AI tool",
        href: "/symptom-checker",
    },
    QuickAction {
        title: "Find a Doctor",
        description: "Browse specialists",
        href: "/providers",
    },
    QuickAction {
        title: "Book Appointment",
        description: "Schedule a visit",
        href: "/appointments",
    },
];

fn matches(field: &str, needle: &str) -> bool {
    field.to_lowercase().contains(needle)
}

fn into_results<T>(query: &str, results: Vec<T>, empty_message: &str) -> SearchResults<T> {
    let total = results.len();
    SearchResults {
        query: query.to_string(),
        results,
        total,
        no_results: total == 0,
        message: (total == 0).then(|| empty_message.to_string()),
    }
}

/// Read-only view over the doctor, hospital and appointment tables.
///
/// All joins go through stable ids (`Doctor::hospital_id`,
/// `Appointment::doctor_id`); construction fails if any of them dangle.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    doctors: Vec<Doctor>,
    hospitals: Vec<Hospital>,
    appointments: Vec<Appointment>,
}

impl DirectoryService {
    pub fn new(
        doctors: Vec<Doctor>,
        hospitals: Vec<Hospital>,
        appointments: Vec<Appointment>,
    ) -> Result<Self, DirectoryError> {
        for doctor in &doctors {
            if !hospitals.iter().any(|h| h.id == doctor.hospital_id) {
                return Err(DirectoryError::DanglingReference {
                    entity: "doctor",
                    id: doctor.id.clone(),
                    target: "hospital",
                    target_id: doctor.hospital_id.clone(),
                });
            }
        }

        for appointment in &appointments {
            if !doctors.iter().any(|d| d.id == appointment.doctor_id) {
                return Err(DirectoryError::DanglingReference {
                    entity: "appointment",
                    id: appointment.id.clone(),
                    target: "doctor",
                    target_id: appointment.doctor_id.clone(),
                });
            }
        }

        Ok(Self {
            doctors,
            hospitals,
            appointments,
        })
    }

    pub fn from_fixtures(today: NaiveDate) -> Result<Self, DirectoryError> {
        Self::new(
            fixtures::doctors(),
            fixtures::hospitals(),
            fixtures::appointments(today),
        )
    }

    fn hospital(&self, hospital_id: &str) -> Option<&Hospital> {
        self.hospitals.iter().find(|h| h.id == hospital_id)
    }

    fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }

    fn doctor_view(&self, doctor: &Doctor) -> DoctorView {
        DoctorView {
            hospital_name: self
                .hospital(&doctor.hospital_id)
                .map(|h| h.name.clone())
                .unwrap_or_default(),
            initials: doctor.initials(),
            doctor: doctor.clone(),
        }
    }

    fn appointment_view(&self, appointment: &Appointment) -> AppointmentView {
        let doctor = self.doctor(&appointment.doctor_id);
        AppointmentView {
            doctor_name: doctor.map(|d| d.name.clone()).unwrap_or_default(),
            avatar_id: doctor.map(|d| d.avatar_id.clone()).unwrap_or_default(),
            initials: doctor.map(Doctor::initials).unwrap_or_default(),
            date_label: appointment.date.format("%B %-d, %Y").to_string(),
            time_label: appointment.time.format("%I:%M %p").to_string(),
            appointment: appointment.clone(),
        }
    }

    /// Case-insensitive substring match on name, specialty or hospital name.
    /// A blank term returns every doctor.
    pub fn search_doctors(&self, term: &str) -> SearchResults<DoctorView> {
        let needle = term.trim().to_lowercase();
        debug!("Searching doctors for '{}'", needle);

        let results = self
            .doctors
            .iter()
            .filter(|doctor| {
                matches(&doctor.name, &needle)
                    || matches(&doctor.specialty, &needle)
                    || self
                        .hospital(&doctor.hospital_id)
                        .is_some_and(|h| matches(&h.name, &needle))
            })
            .map(|doctor| self.doctor_view(doctor))
            .collect();

        into_results(term, results, NO_DOCTORS_MESSAGE)
    }

    /// Case-insensitive substring match on name, city or address.
    pub fn search_hospitals(&self, term: &str) -> SearchResults<Hospital> {
        let needle = term.trim().to_lowercase();
        debug!("Searching hospitals for '{}'", needle);

        let results = self
            .hospitals
            .iter()
            .filter(|h| {
                matches(&h.name, &needle) || matches(&h.city, &needle) || matches(&h.address, &needle)
            })
            .cloned()
            .collect();

        into_results(term, results, NO_HOSPITALS_MESSAGE)
    }

    pub fn get_doctor(&self, doctor_id: &str) -> Result<DoctorView, DirectoryError> {
        self.doctor(doctor_id)
            .map(|doctor| self.doctor_view(doctor))
            .ok_or_else(|| DirectoryError::DoctorNotFound(doctor_id.to_string()))
    }

    pub fn get_hospital(&self, hospital_id: &str) -> Result<Hospital, DirectoryError> {
        self.hospital(hospital_id)
            .cloned()
            .ok_or_else(|| DirectoryError::HospitalNotFound(hospital_id.to_string()))
    }

    pub fn appointments_with_status(&self, status: AppointmentStatus) -> Vec<AppointmentView> {
        self.appointments
            .iter()
            .filter(|a| a.status == status)
            .map(|a| self.appointment_view(a))
            .collect()
    }

    pub fn appointments(&self) -> AppointmentsOverview {
        AppointmentsOverview {
            upcoming: self.appointments_with_status(AppointmentStatus::Upcoming),
            past: self.appointments_with_status(AppointmentStatus::Past),
        }
    }

    pub fn dashboard(&self, user: &User) -> Dashboard {
        let upcoming = self.appointments_with_status(AppointmentStatus::Upcoming);
        let upcoming_total = upcoming.len();

        Dashboard {
            greeting_name: user.first_name().unwrap_or("User").to_string(),
            quick_actions: QUICK_ACTIONS.to_vec(),
            upcoming_appointments: upcoming.into_iter().take(DASHBOARD_UPCOMING_LIMIT).collect(),
            upcoming_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_utils::test_utils::TestUser;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn service() -> DirectoryService {
        DirectoryService::from_fixtures(today()).unwrap()
    }

    #[test]
    fn test_fixtures_are_consistent() {
        let service = service();
        assert_eq!(service.doctors.len(), 4);
        assert_eq!(service.hospitals.len(), 4);
        assert_eq!(service.appointments.len(), 4);
    }

    #[test]
    fn test_search_doctors_by_specialty() {
        let results = service().search_doctors("cardio");
        assert_eq!(results.total, 1);
        assert!(!results.no_results);
        assert!(results.results.iter().all(|d| d.doctor.specialty.to_lowercase().contains("cardio")));
        assert_eq!(results.results[0].doctor.name, "Dr. Emily Carter");
        assert_eq!(results.results[0].hospital_name, "Kovai Medical Center and Hospital");
    }

    #[test]
    fn test_search_doctors_by_hospital_name() {
        let results = service().search_doctors("PSG");
        assert_eq!(results.total, 1);
        assert_eq!(results.results[0].doctor.name, "Dr. Ben Adams");
    }

    #[test]
    fn test_blank_search_returns_everything_in_order() {
        let results = service().search_doctors("  ");
        let ids: Vec<&str> = results.results.iter().map(|d| d.doctor.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_search_without_results() {
        let results = service().search_doctors("orthopedics");
        assert!(results.no_results);
        assert_eq!(results.total, 0);
        assert_eq!(results.message.as_deref(), Some(NO_DOCTORS_MESSAGE));

        let hospitals = service().search_hospitals("Chennai");
        assert!(hospitals.no_results);
        assert_eq!(hospitals.message.as_deref(), Some(NO_HOSPITALS_MESSAGE));
    }

    #[test]
    fn test_search_hospitals_by_city_and_address() {
        assert_eq!(service().search_hospitals("coimbatore").total, 4);

        let by_address = service().search_hospitals("peelamedu");
        assert_eq!(by_address.total, 1);
        assert_eq!(by_address.results[0].name, "PSG Hospitals");
    }

    #[test]
    fn test_lookup_by_id() {
        let service = service();
        assert_eq!(service.get_doctor("4").unwrap().initials, "MC");
        assert_eq!(service.get_hospital("3").unwrap().zip_code, "641037");
        assert_matches!(service.get_doctor("99"), Err(DirectoryError::DoctorNotFound(_)));
        assert_matches!(service.get_hospital("99"), Err(DirectoryError::HospitalNotFound(_)));
    }

    #[test]
    fn test_appointments_join_by_doctor_id() {
        let overview = service().appointments();
        assert_eq!(overview.upcoming.len(), 2);
        assert_eq!(overview.past.len(), 2);

        let first = &overview.upcoming[0];
        assert_eq!(first.doctor_name, "Dr. Emily Carter");
        assert_eq!(first.avatar_id, "doctor-1");
        assert_eq!(first.date_label, "October 26, 2026");
        assert_eq!(first.time_label, "10:00 AM");

        let annual = overview.past.iter().find(|a| a.appointment.id == "4").unwrap();
        assert_eq!(annual.doctor_name, "Dr. Emily Carter");
        assert_eq!(annual.appointment.date, NaiveDate::from_ymd_opt(2026, 9, 19).unwrap());
    }

    #[test]
    fn test_dangling_references_are_rejected() {
        let mut doctors = fixtures::doctors();
        doctors[0].hospital_id = "missing".to_string();
        let result = DirectoryService::new(doctors, fixtures::hospitals(), vec![]);
        assert_matches!(result, Err(DirectoryError::DanglingReference { entity: "doctor", .. }));

        let mut appointments = fixtures::appointments(today());
        appointments[1].doctor_id = "Dr. Ben Adams".to_string();
        let result = DirectoryService::new(fixtures::doctors(), fixtures::hospitals(), appointments);
        assert_matches!(result, Err(DirectoryError::DanglingReference { entity: "appointment", .. }));
    }

    #[test]
    fn test_dashboard() {
        let user = TestUser::patient("jane@example.com").with_name("Jane Doe").to_user();
        let dashboard = service().dashboard(&user);

        assert_eq!(dashboard.greeting_name, "Jane");
        assert_eq!(dashboard.quick_actions.len(), 3);
        assert_eq!(dashboard.quick_actions[1].href, "/providers");
        assert_eq!(dashboard.upcoming_appointments.len(), 2);
        assert_eq!(dashboard.upcoming_total, 2);

        let mut anonymous = user.clone();
        anonymous.display_name = None;
        assert_eq!(service().dashboard(&anonymous).greeting_name, "User");
    }
}
