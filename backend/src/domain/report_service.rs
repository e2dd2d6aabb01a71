//! Report orchestration.
//!
//! [`ReportService`] is stateless apart from its configuration: every call
//! takes a [`SchoolData`] snapshot, indexes each record collection once, and
//! hands the per-student selections to the aggregators.

use anyhow::{anyhow, Result};
use log::{debug, info};
use shared::{BonusSummary, FinanceAcademicYear, Period, StudentReport};

use crate::config::ReportingConfig;
use crate::domain::aggregation::{self, targets_for_level};
use crate::domain::commands::reports::{ClassReportQuery, FinanceYearQuery, StudentReportQuery};
use crate::domain::models::student::normalize_name;
use crate::domain::models::{ActivityRecord, AttendanceRecord, ExpenseRecord, MemorizationRecord, Student};
use crate::domain::period::PeriodExt;
use crate::domain::record_filter::{RecordIndex, StudentDirectory};
use crate::domain::school_data::SchoolData;

/// Every record collection of a snapshot, resolved and date-parsed once
struct SchoolIndex<'a> {
    attendance: RecordIndex<'a, AttendanceRecord>,
    memorization: RecordIndex<'a, MemorizationRecord>,
    activities: RecordIndex<'a, ActivityRecord>,
    expenses: RecordIndex<'a, ExpenseRecord>,
}

impl<'a> SchoolIndex<'a> {
    fn new(data: &'a SchoolData) -> Self {
        let directory: StudentDirectory = data.directory();
        let index = Self {
            attendance: RecordIndex::new(&data.attendance, &directory),
            memorization: RecordIndex::new(&data.memorization, &directory),
            activities: RecordIndex::new(&data.activities, &directory),
            expenses: RecordIndex::new(&data.expenses, &directory),
        };
        debug!(
            "Indexed records, excluded {} attendance, {} memorization, {} activity, {} expense",
            index.attendance.excluded(),
            index.memorization.excluded(),
            index.activities.excluded(),
            index.expenses.excluded()
        );
        index
    }
}

#[derive(Debug, Clone)]
pub struct ReportService {
    config: ReportingConfig,
}

impl ReportService {
    pub fn new(config: ReportingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportingConfig {
        &self.config
    }

    /// Full report for one student. An unknown student id is an error; a
    /// known student with no records gets an all-zero report.
    pub fn student_report(&self, data: &SchoolData, query: StudentReportQuery) -> Result<StudentReport> {
        query.period.validate()?;
        info!("Building report for {} over {}", query.student_id, query.period.label());

        let student = data
            .student(&query.student_id)
            .ok_or_else(|| anyhow!("Student not found: {}", query.student_id))?;

        Ok(self.build_report(&SchoolIndex::new(data), student, &query.period))
    }

    /// Reports for every student of a class, ordered by name
    pub fn class_report(&self, data: &SchoolData, query: ClassReportQuery) -> Result<Vec<StudentReport>> {
        query.period.validate()?;
        info!("Building class report for {} over {}", query.class_name, query.period.label());

        let class_name = normalize_name(&query.class_name);
        if class_name.is_empty() {
            return Err(anyhow!("Class name cannot be empty"));
        }

        let mut students: Vec<&Student> = data
            .students
            .iter()
            .filter(|s| normalize_name(&s.class_name) == class_name)
            .filter(|s| query.include_inactive || s.active)
            .collect();
        students.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let index = SchoolIndex::new(data);
        let reports: Vec<StudentReport> = students
            .into_iter()
            .map(|student| self.build_report(&index, student, &query.period))
            .collect();

        info!("Built {} reports for class {}", reports.len(), query.class_name);
        Ok(reports)
    }

    /// Memorization bonus over all records, for the dashboard
    pub fn bonus_summary(&self, data: &SchoolData) -> BonusSummary {
        let summary = aggregation::bonus_summary(
            &data.memorization,
            &data.directory(),
            self.config.bonus_rate_per_page,
        );
        info!(
            "Bonus summary: {} students, {} pages, total {}",
            summary.entries.len(),
            summary.total_pages,
            summary.total_bonus
        );
        summary
    }

    /// Month-by-month spending over an academic year
    pub fn finance_academic_year(
        &self,
        data: &SchoolData,
        query: FinanceYearQuery,
    ) -> Result<FinanceAcademicYear> {
        info!(
            "Building finance breakdown for {} in academic year {}/{}",
            query.student_id,
            query.academic_year,
            query.academic_year.saturating_add(1)
        );

        let student = data
            .student(&query.student_id)
            .ok_or_else(|| anyhow!("Student not found: {}", query.student_id))?;

        Ok(aggregation::finance_academic_year(
            &data.expenses,
            &data.directory(),
            &student.key(),
            query.academic_year,
            self.config.daily_expense_rate,
        ))
    }

    fn build_report(&self, index: &SchoolIndex<'_>, student: &Student, period: &Period) -> StudentReport {
        let key = student.key();

        let attendance = index.attendance.select(&key, period);
        let memorization = index.memorization.select(&key, period);
        let activities = index.activities.select(&key, period);
        let expenses = index.expenses.select(&key, period);

        debug!(
            "{}: {} attendance, {} memorization, {} activity, {} expense records in period",
            student.name,
            attendance.len(),
            memorization.len(),
            activities.len(),
            expenses.len()
        );

        let targets = targets_for_level(&student.level);

        StudentReport {
            student: student.summary(),
            period: *period,
            period_label: period.label(),
            attendance: aggregation::tally_attendance(&attendance),
            memorization: aggregation::memorization_progress(&memorization, &targets, period),
            activities: aggregation::tally_activities(&activities, &self.config.tracked_activities),
            finance: aggregation::finance_usage(&expenses, period, self.config.daily_expense_rate),
        }
    }
}
