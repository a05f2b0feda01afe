use bridgex::{AnalysisReport, FailMode, MemberCheck, ScenarioDescriptor};
use std::fmt::Write;

/// Short label for a failure mode.
fn mode_label(mode: FailMode) -> &'static str {
    match mode {
        FailMode::None => "ok",
        FailMode::Buckles => "BUCKLES",
        FailMode::Yields => "YIELDS",
        FailMode::Slenderness => "TOO SLENDER",
    }
}

/// One line of the member table.
fn member_line(output: &mut String, check: &MemberCheck) {
    writeln!(
        output,
        "  {:>4}  {:>10.1} / {:>10.1}  {:<11}  {:>10.1} / {:>10.1}  {}",
        check.member,
        check.max_forces.compression,
        check.strength.compressive,
        mode_label(check.compressive_failure),
        check.max_forces.tension,
        check.strength.tensile,
        mode_label(check.tensile_failure),
    )
    .expect("writing to string cannot fail");
}

/// Render a textual summary of a load test.
///
/// Forces are listed as worst-case demand over capacity in kN, in the layout
/// of a member strength table (see
/// <https://en.wikipedia.org/wiki/Truss_bridge#Analysis>).
#[must_use]
pub fn render_summary(descriptor: &ScenarioDescriptor, report: &AnalysisReport) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Scenario {} (load case {:?}, {} panels, {}m over / {}m under, {:?})",
        descriptor.code,
        descriptor.load_case,
        descriptor.n_panels,
        descriptor.over_meters,
        descriptor.under_meters,
        descriptor.support
    )
    .expect("writing to string cannot fail");

    let written = match &report.cost_breakdown {
        Some(breakdown) => writeln!(
            &mut output,
            "Cost: ${} (material ${:.2}, connections ${:.2}, products ${:.2}, site ${:.2})",
            report.cost, breakdown.material, breakdown.connection, breakdown.product, breakdown.site
        ),
        None => writeln!(&mut output, "Cost: ${}", report.cost),
    };
    written.expect("writing to string cannot fail");

    if let Some(error) = &report.error {
        writeln!(&mut output, "Not analysed: {error}").expect("writing to string cannot fail");
        return output;
    }

    output.push_str("Member   compression (kN)             tension (kN)\n");
    for check in &report.members {
        member_line(&mut output, check);
    }

    let failures = report.failing_members().count();
    if report.valid {
        output.push_str("Load test passed\n");
    } else {
        writeln!(&mut output, "Load test failed: {failures} members fail")
            .expect("writing to string cannot fail");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgex::{AnalysisError, CostBreakdown, MaxForces, MemberStrength};

    fn descriptor() -> ScenarioDescriptor {
        ScenarioDescriptor::parse("1020400000", 5_000.0).expect("valid code")
    }

    fn check(compression: f64) -> MemberCheck {
        MemberCheck::new(
            1,
            MemberStrength {
                compressive: 120.0,
                tensile: 300.0,
                compressive_fail_mode: FailMode::Buckles,
                tensile_fail_mode: FailMode::Yields,
            },
            MaxForces {
                compression,
                tension: 10.0,
            },
        )
    }

    fn report(members: Vec<MemberCheck>, valid: bool) -> AnalysisReport {
        AnalysisReport {
            valid,
            cost: 9_210,
            cost_breakdown: Some(CostBreakdown {
                material: 400.0,
                connection: 1_200.0,
                product: 1_000.0,
                site: 5_000.0,
            }),
            error: None,
            members,
            displacements: None,
            member_forces: None,
        }
    }

    #[test]
    fn formats_passing_report() {
        let text = render_summary(&descriptor(), &report(vec![check(50.0)], true));
        assert!(text.contains("Scenario 1020400000"));
        assert!(text.contains("Cost: $9210"));
        assert!(text.contains("site $5000.00"));
        assert!(text.contains("50.0 /      120.0  ok"));
        assert!(text.contains("Load test passed"));
    }

    #[test]
    fn formats_failing_members() {
        let text = render_summary(&descriptor(), &report(vec![check(130.0)], false));
        assert!(text.contains("BUCKLES"));
        assert!(text.contains("Load test failed: 1 members fail"));
    }

    #[test]
    fn reports_unanalysable_bridge() {
        let unanalysed = AnalysisReport {
            valid: false,
            cost: 0,
            cost_breakdown: None,
            error: Some(AnalysisError::NoMembers),
            members: Vec::new(),
            displacements: None,
            member_forces: None,
        };
        let text = render_summary(&descriptor(), &unanalysed);
        assert!(text.contains("Cost: $0\n"));
        assert!(text.contains("Not analysed: bridge has no members"));
        assert!(!text.contains("Load test"));
    }
}
