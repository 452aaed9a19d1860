//! Static reference data loaded once at start-up.

use chrono::{Days, NaiveDate, NaiveTime};
use tracing::warn;

use crate::models::{Appointment, AppointmentStatus, Doctor, Hospital};

fn doctor(
    id: &str,
    name: &str,
    specialty: &str,
    hospital_id: &str,
    rating: f32,
    reviews: u32,
) -> Doctor {
    Doctor {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        hospital_id: hospital_id.to_string(),
        rating,
        reviews,
        avatar_id: format!("doctor-{}", id),
    }
}

pub fn doctors() -> Vec<Doctor> {
    vec![
        doctor("1", "Dr. Emily Carter", "Cardiology", "1", 4.9, 128),
        doctor("2", "Dr. Ben Adams", "Pediatrics", "2", 4.8, 95),
        doctor("3", "Dr. Chloe Davis", "Dermatology", "3", 4.9, 210),
        doctor("4", "Dr. Marcus Chen", "Neurology", "4", 4.7, 78),
    ]
}

pub fn hospitals() -> Vec<Hospital> {
    vec![
        Hospital {
            id: "1".to_string(),
            name: "Kovai Medical Center and Hospital".to_string(),
            address: "99, Avinashi Rd, SITRA".to_string(),
            city: "Coimbatore".to_string(),
            state: "Tamil Nadu".to_string(),
            zip_code: "641014".to_string(),
            phone_number: "+91 422 432 3800".to_string(),
            website: "https://www.kmchhospitals.com/".to_string(),
            description: "A leading multi-specialty hospital in Coimbatore known for its advanced healthcare services and patient-centric approach.".to_string(),
            image_id: "hospital-1".to_string(),
        },
        Hospital {
            id: "2".to_string(),
            name: "PSG Hospitals".to_string(),
            address: "Peelamedu".to_string(),
            city: "Coimbatore".to_string(),
            state: "Tamil Nadu".to_string(),
            zip_code: "641004".to_string(),
            phone_number: "+91 422 257 0170".to_string(),
            website: "https://psghospitals.com/".to_string(),
            description: "A well-established teaching hospital offering a wide range of medical services with a focus on quality care and medical education.".to_string(),
            image_id: "hospital-2".to_string(),
        },
        Hospital {
            id: "3".to_string(),
            name: "G. Kuppuswamy Naidu Memorial Hospital".to_string(),
            address: "P.B. No. 6327, Nethaji Road, Pappanaickenpalayam".to_string(),
            city: "Coimbatore".to_string(),
            state: "Tamil Nadu".to_string(),
            zip_code: "641037".to_string(),
            phone_number: "+91 422 224 5000".to_string(),
            website: "https://www.gknmhospital.org/".to_string(),
            description: "A trusted healthcare institution with a long history of serving the community, known for its ethical practices and comprehensive medical care.".to_string(),
            image_id: "hospital-3".to_string(),
        },
        Hospital {
            id: "4".to_string(),
            name: "Sri Ramakrishna Hospital".to_string(),
            address: "395, Sarojini Naidu Rd, New Siddhapudur".to_string(),
            city: "Coimbatore".to_string(),
            state: "Tamil Nadu".to_string(),
            zip_code: "641044".to_string(),
            phone_number: "+91 422 450 0000".to_string(),
            website: "https://www.sriramakrishnahospital.com/".to_string(),
            description: "A multi-specialty hospital providing high-quality healthcare services with state-of-the-art facilities and a team of experienced doctors.".to_string(),
            image_id: "hospital-4".to_string(),
        },
    ]
}

fn appointment(
    id: &str,
    doctor_id: &str,
    specialty: &str,
    date: Option<NaiveDate>,
    (hour, minute): (u32, u32),
    appointment_type: &str,
    status: AppointmentStatus,
) -> Option<Appointment> {
    let (Some(date), Some(time)) = (date, NaiveTime::from_hms_opt(hour, minute, 0)) else {
        warn!("Dropping appointment fixture {}: date or time out of range", id);
        return None;
    };

    Some(Appointment {
        id: id.to_string(),
        doctor_id: doctor_id.to_string(),
        specialty: specialty.to_string(),
        date,
        time,
        appointment_type: appointment_type.to_string(),
        status,
    })
}

/// Appointment dates are offsets from `today`.
pub fn appointments(today: NaiveDate) -> Vec<Appointment> {
    let ahead = |days| today.checked_add_days(Days::new(days));
    let behind = |days| today.checked_sub_days(Days::new(days));

    [
        appointment("1", "1", "Cardiology", ahead(7), (10, 0), "Virtual Consultation", AppointmentStatus::Upcoming),
        appointment("2", "2", "Pediatrics", ahead(14), (14, 30), "Virtual Consultation", AppointmentStatus::Upcoming),
        appointment("3", "3", "Dermatology", behind(10), (11, 0), "Follow-up", AppointmentStatus::Past),
        appointment("4", "1", "Cardiology", behind(30), (9, 0), "Annual Check-up", AppointmentStatus::Past),
    ]
    .into_iter()
    .flatten()
    .collect()
}
