use serde::Deserialize;

use crate::errors::AppError;
use crate::models::company::CompanyStatus;
use crate::validation::{check_len, check_url, clean, require, MAX_SHORT_TEXT};

/// Editable company fields as submitted by the client.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyInput {
    pub name: Option<String>,
    pub website_url: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub position_title: Option<String>,
    pub job_description_url: Option<String>,
}

/// Company fields that passed validation and are ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyFields {
    pub name: String,
    pub website_url: Option<String>,
    pub location: Option<String>,
    pub status: CompanyStatus,
    pub salary_min: Option<i32>,
    pub salary_max: Option<i32>,
    pub position_title: Option<String>,
    pub job_description_url: Option<String>,
}

impl CompanyInput {
    pub fn validate(self) -> Result<CompanyFields, AppError> {
        let name = require("name", self.name)?;
        check_len("name", Some(&name), MAX_SHORT_TEXT)?;

        let location = clean(self.location);
        check_len("location", location.as_deref(), MAX_SHORT_TEXT)?;

        let position_title = clean(self.position_title);
        check_len("position_title", position_title.as_deref(), MAX_SHORT_TEXT)?;

        let website_url = clean(self.website_url);
        check_url("website_url", website_url.as_deref())?;

        let job_description_url = clean(self.job_description_url);
        check_url("job_description_url", job_description_url.as_deref())?;

        let status = match clean(self.status) {
            Some(s) => s.parse::<CompanyStatus>().map_err(AppError::Validation)?,
            None => CompanyStatus::default(),
        };

        let salary_min = salary("salary_min", self.salary_min)?;
        let salary_max = salary("salary_max", self.salary_max)?;
        if let (Some(min), Some(max)) = (salary_min, salary_max) {
            if min > max {
                return Err(AppError::Validation(
                    "salary_min must not exceed salary_max".to_string(),
                ));
            }
        }

        Ok(CompanyFields {
            name,
            website_url,
            location,
            status,
            salary_min,
            salary_max,
            position_title,
            job_description_url,
        })
    }
}

fn salary(field: &str, value: Option<i64>) -> Result<Option<i32>, AppError> {
    value
        .map(|v| {
            if v < 0 {
                return Err(AppError::Validation(format!("{field} must not be negative")));
            }
            i32::try_from(v).map_err(|_| AppError::Validation(format!("{field} is out of range")))
        })
        .transpose()
}
