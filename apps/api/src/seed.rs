//! Sample data for local development.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::auth::upsert_user;
use crate::companies::input::CompanyInput;
use crate::companies::repo as company_repo;
use crate::interviews::input::InterviewFields;
use crate::interviews::repo as interview_repo;
use crate::models::interview::InterviewType;
use crate::prep::input::PrepInput;
use crate::prep::repo as prep_repo;

struct SampleCompany {
    name: &'static str,
    position_title: &'static str,
    location: &'static str,
    status: &'static str,
    website_url: &'static str,
    salary_min: i64,
    salary_max: i64,
}

struct SampleInterview {
    company: usize,
    days_ahead: i64,
    hours_ahead: i64,
    interviewer_name: &'static str,
    interview_type: InterviewType,
    meeting_link: &'static str,
    notes: &'static str,
}

struct SamplePrep {
    company: usize,
    self_intro: &'static str,
    why_apply: &'static str,
    questions_to_ask: &'static str,
    additional_notes: &'static str,
}

const COMPANIES: [SampleCompany; 5] = [
    SampleCompany {
        name: "Tech Corp",
        position_title: "Senior Software Engineer",
        location: "San Francisco, CA",
        status: "interview",
        website_url: "https://techcorp.com",
        salary_min: 150_000,
        salary_max: 200_000,
    },
    SampleCompany {
        name: "StartUp Inc",
        position_title: "Full Stack Developer",
        location: "New York, NY",
        status: "applied",
        website_url: "https://startupinc.com",
        salary_min: 120_000,
        salary_max: 160_000,
    },
    SampleCompany {
        name: "Big Finance",
        position_title: "Backend Engineer",
        location: "Chicago, IL",
        status: "interview",
        website_url: "https://bigfinance.com",
        salary_min: 140_000,
        salary_max: 180_000,
    },
    SampleCompany {
        name: "Cloud Systems",
        position_title: "DevOps Engineer",
        location: "Seattle, WA",
        status: "offer",
        website_url: "https://cloudsystems.com",
        salary_min: 130_000,
        salary_max: 170_000,
    },
    SampleCompany {
        name: "Data Analytics Co",
        position_title: "Data Engineer",
        location: "Boston, MA",
        status: "rejected",
        website_url: "https://dataanalytics.com",
        salary_min: 110_000,
        salary_max: 150_000,
    },
];

const INTERVIEWS: [SampleInterview; 3] = [
    SampleInterview {
        company: 0,
        days_ahead: 2,
        hours_ahead: 10,
        interviewer_name: "John Smith",
        interview_type: InterviewType::Technical,
        meeting_link: "https://zoom.us/j/123456789",
        notes: "Prepare for system design questions",
    },
    SampleInterview {
        company: 0,
        days_ahead: 5,
        hours_ahead: 14,
        interviewer_name: "Sarah Johnson",
        interview_type: InterviewType::Hr,
        meeting_link: "https://zoom.us/j/987654321",
        notes: "Final round - discuss compensation",
    },
    SampleInterview {
        company: 2,
        days_ahead: 3,
        hours_ahead: 9,
        interviewer_name: "Mike Chen",
        interview_type: InterviewType::Phone,
        meeting_link: "https://meet.google.com/abc-defg-hij",
        notes: "Initial screening call",
    },
];

const PREPS: [SamplePrep; 2] = [
    SamplePrep {
        company: 0,
        self_intro: "I am a software engineer with 5 years of experience in full-stack \
development. I specialize in Python and JavaScript.",
        why_apply: "Tech Corp is a leader in cloud infrastructure, and I am excited about the \
opportunity to work on scalable systems.",
        questions_to_ask: "1. What is the team structure?\n2. What are the main challenges the \
team is facing?\n3. What is the career growth path?",
        additional_notes: "Review system design patterns before the technical interview.",
    },
    SamplePrep {
        company: 1,
        self_intro: "Full-stack developer with expertise in React and Django.",
        why_apply: "StartUp Inc is building innovative solutions in the fintech space.",
        questions_to_ask: "1. What is the tech stack?\n2. How is the team organized?\n3. What are \
the main priorities for the next quarter?",
        additional_notes: "Prepare portfolio projects.",
    },
];

impl SampleCompany {
    fn input(&self) -> CompanyInput {
        CompanyInput {
            name: Some(self.name.into()),
            website_url: Some(self.website_url.into()),
            location: Some(self.location.into()),
            status: Some(self.status.into()),
            salary_min: Some(self.salary_min),
            salary_max: Some(self.salary_max),
            position_title: Some(self.position_title.into()),
            job_description_url: None,
        }
    }
}

impl SampleInterview {
    fn fields(&self, now: DateTime<Utc>) -> InterviewFields {
        InterviewFields {
            start_datetime: now
                + Duration::days(self.days_ahead)
                + Duration::hours(self.hours_ahead),
            interviewer_name: Some(self.interviewer_name.into()),
            interview_type: Some(self.interview_type),
            meeting_link: Some(self.meeting_link.into()),
            notes: Some(self.notes.into()),
        }
    }
}

impl SamplePrep {
    fn input(&self) -> PrepInput {
        PrepInput {
            self_intro: Some(self.self_intro.into()),
            why_apply: Some(self.why_apply.into()),
            questions_to_ask: Some(self.questions_to_ask.into()),
            additional_notes: Some(self.additional_notes.into()),
        }
    }
}

/// Replaces everything `external_id` owns with the sample data set.
///
/// Runs in one transaction: a failure part way leaves the user's existing
/// data untouched.
pub async fn seed_user(pool: &PgPool, external_id: &str) -> Result<()> {
    let mut tx = pool.begin().await?;

    let user = upsert_user(&mut *tx, external_id, None)
        .await
        .context("Failed to provision user")?;

    let removed = company_repo::delete_all_for_user(&mut *tx, user.id).await?;
    info!("Removed {removed} existing companies for {external_id}");

    let mut company_ids = Vec::with_capacity(COMPANIES.len());
    for sample in &COMPANIES {
        let fields = sample
            .input()
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid sample company '{}': {e}", sample.name))?;
        let company = company_repo::create_company(&mut *tx, user.id, &fields).await?;
        info!("Created company: {}", company.name);
        company_ids.push(company.id);
    }

    let now = Utc::now();
    for sample in &INTERVIEWS {
        let company_id = company_ids[sample.company];
        let event =
            interview_repo::create_interview(&mut *tx, user.id, company_id, &sample.fields(now))
                .await?;
        info!(
            "Created interview: {} on {}",
            COMPANIES[sample.company].name, event.start_datetime
        );
    }

    for sample in &PREPS {
        prep_repo::upsert_prep(&mut *tx, company_ids[sample.company], &sample.input()).await?;
        info!("Created prep notes for: {}", COMPANIES[sample.company].name);
    }

    tx.commit().await.context("Failed to commit sample data")?;
    info!("Successfully seeded sample data for {external_id}");
    Ok(())
}
