use crate::structs::report_statistics::ReportStatistics;
use crate::structs::scan_outcome::ScanOutcome;

pub struct ScanLogger {}

impl ScanLogger {
    pub fn log_scan_start(target: &str, languages: &[String]) {
        println!("🔍 Scanning {}", target);
        if !languages.is_empty() {
            println!("   Languages: {}", languages.join(", "));
        }
    }

    pub fn log_scan_outcome(outcome: &ScanOutcome) {
        println!(
            "📂 Scanned {} file{}, {} potential finding{}",
            outcome.files_scanned,
            if outcome.files_scanned == 1 { "" } else { "s" },
            outcome.findings.len(),
            if outcome.findings.len() == 1 { "" } else { "s" }
        );
        for warning in &outcome.warnings {
            println!("⚠️  {}", warning);
        }
    }

    pub fn log_analysis_start(total: usize, batch_size: usize) {
        let batches = total.div_ceil(batch_size.max(1));
        println!(
            "🤖 Sending {} finding{} for analysis in {} batch{}",
            total,
            if total == 1 { "" } else { "s" },
            batches,
            if batches == 1 { "" } else { "es" }
        );
    }

    pub fn log_summary(statistics: &ReportStatistics) {
        println!("\n📊 Scan Summary");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  Files scanned:       {}", statistics.files_scanned);
        println!("  Findings analyzed:   {}", statistics.vulnerabilities_analyzed);
        println!("  Confirmed:           {}", statistics.total_vulnerabilities);
        println!("  🔴 High severity:    {}", statistics.high_severity);
        println!("  🟡 Medium severity:  {}", statistics.medium_severity);
        println!("  🟢 Low severity:     {}", statistics.low_severity);
        println!("  ✅ False positives:  {}", statistics.false_positives);
    }

    pub fn log_report_written(path: &str) {
        println!("\n📝 Report written to {}", path);
    }
}
