//! Attendance endpoints.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use hrms_attendance::{evaluate_check_in, CheckInAssessment, CheckInRejection, Coordinates, OfficeLocation};
use hrms_core::OfficeId;
use hrms_models::{Attendance, Office};

use crate::api::{ApiClient, ClientError};

/// Selfie attached to a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInPhoto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// What the device reports when the employee checks in.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInSubmission {
    pub position: Coordinates,
    /// GPS accuracy radius, in meters.
    pub accuracy_m: f64,
    pub photo: Option<CheckInPhoto>,
}

impl CheckInSubmission {
    fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new()
            .text("latitude", self.position.latitude().to_string())
            .text("longitude", self.position.longitude().to_string())
            .text("accuracy", self.accuracy_m.to_string());

        if let Some(photo) = self.photo {
            let part = Part::bytes(photo.bytes)
                .file_name(photo.file_name)
                .mime_str(&photo.content_type)
                .map_err(|e| ClientError::InvalidRequest(format!("photo content type: {e}")))?;
            form = form.part("image", part);
        }

        Ok(form)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckInError {
    #[error("check-in refused: {0}")]
    Rejected(#[from] CheckInRejection),
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone)]
pub struct AttendanceService {
    api: ApiClient,
}

impl AttendanceService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn office_detail(&self, id: OfficeId) -> Result<Office, ClientError> {
        let req = self.api.request(Method::GET, &format!("/offices/{id}"))?;
        self.api.send_json(req).await
    }

    /// Today's record for the signed-in employee, `None` before check-in.
    pub async fn today_attendance(&self) -> Result<Option<Attendance>, ClientError> {
        let req = self.api.request(Method::GET, "/attendances/get/today-attendance")?;
        self.api.send_json(req).await
    }

    /// Submit a check-in as-is. Prefer [`check_in_at`](Self::check_in_at),
    /// which applies the office geofence first.
    pub async fn check_in(&self, submission: CheckInSubmission) -> Result<(), ClientError> {
        let form = submission.into_form()?;
        let req = self
            .api
            .request(Method::POST, "/attendances/user/check-in")?
            .multipart(form);
        self.api.send_empty(req).await
    }

    /// Check in after verifying the position against the office geofence.
    /// Nothing is sent when the position is rejected.
    pub async fn check_in_at(
        &self,
        office: &OfficeLocation,
        submission: CheckInSubmission,
    ) -> Result<CheckInAssessment, CheckInError> {
        let assessment = match evaluate_check_in(office, &submission.position, submission.accuracy_m) {
            Ok(assessment) => assessment,
            Err(rejection) => {
                tracing::info!(office_id = %office.office_id(), %rejection, "check-in rejected locally");
                return Err(rejection.into());
            }
        };

        self.check_in(submission).await?;
        tracing::info!(
            office_id = %office.office_id(),
            distance_m = assessment.distance_m,
            "checked in"
        );
        Ok(assessment)
    }

    pub async fn check_out(&self) -> Result<(), ClientError> {
        let req = self.api.request(Method::POST, "/attendances/user/check-out")?;
        self.api.send_empty(req).await
    }
}
