use std::fmt::Display;

use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::{Breakdown, Stage};

/// Win probability for one stage, and optionally its simulated counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct StageEstimate {
    pub stage: Stage,
    pub exact: f64,
    pub simulated: Option<f64>,
}

pub fn tabulate_stages(estimates: &[StageEstimate]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Stage".into(),
                "Exact".into(),
                "Simulated".into(),
                "Difference".into(),
            ],
        ));

    table.push_rows(estimates.iter().map(|estimate| {
        let (simulated, difference) = match estimate.simulated {
            None => ("-".to_string(), "-".to_string()),
            Some(simulated) => (
                format!("{simulated:.6}"),
                format!("{:+.6}", simulated - estimate.exact),
            ),
        };
        Row::new(
            Styles::default(),
            vec![
                estimate.stage.to_string().into(),
                format!("{:.6}", estimate.exact).into(),
                simulated.into(),
                difference.into(),
            ],
        )
    }));
    table
}

/// One row per enumerated final, followed by the total.
pub fn tabulate_breakdown<K: Ord + Display>(title: &str, breakdown: &Breakdown<K>) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![title.into(), "Probability".into()],
        ));

    table.push_rows(breakdown.outcomes.iter().map(|(key, prob)| {
        Row::new(
            Styles::default(),
            vec![key.to_string().into(), format!("{prob:.6}").into()],
        )
    }));
    table.push_row(Row::new(
        Styles::default().with(Header(true)),
        vec!["Total".into(), format!("{:.6}", breakdown.probability).into()],
    ));
    table
}
