use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub default_slot_duration_minutes: u32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            default_slot_duration_minutes: 30,
        }
    }
}

impl TestConfig {
    /// Config pointing at a mock PostgREST server, e.g. `MockServer::uri()`.
    pub fn with_supabase_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            default_slot_duration_minutes: self.default_slot_duration_minutes,
            ..AppConfig::default()
        }
    }
}

/// Rows shaped the way PostgREST returns them for the tables the
/// availability reads touch.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn service_response(service_id: &str, duration_minutes: Option<i32>) -> serde_json::Value {
        json!({
            "id": service_id,
            "duration_minutes": duration_minutes
        })
    }

    pub fn eligible_doctor_response(doctor_id: &str, service_id: &str) -> serde_json::Value {
        json!({
            "id": doctor_id,
            "doctor_services": [
                { "service_id": service_id }
            ]
        })
    }

    pub fn schedule_response(
        doctor_id: &str,
        start_time: &str,
        end_time: &str,
        max_patients: i32,
    ) -> serde_json::Value {
        json!({
            "doctor_id": doctor_id,
            "start_time": start_time,
            "end_time": end_time,
            "max_patients": max_patients
        })
    }

    pub fn booking_response(booking_time: &str) -> serde_json::Value {
        json!({
            "booking_time": booking_time
        })
    }

    pub fn error_response(message: &str, code: &str) -> serde_json::Value {
        json!({
            "message": message,
            "code": code,
            "details": null,
            "hint": null
        })
    }

    pub fn random_id() -> String {
        Uuid::new_v4().to_string()
    }
}
