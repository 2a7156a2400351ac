//! Quota aggregation over closed deals and target rows.
//!
//! Pure, synchronous computation over collections the caller has already
//! fetched. Missing rows contribute zero; the aggregator never fails on
//! absent data.

use rust_decimal::Decimal;

use crate::deals::deals_model::Deal;
use crate::fiscal::{FinancialYear, Quarter, QuarterSelection};
use crate::quota::quota_model::{QuarterPerformance, TeamSelection, ViewScope};
use crate::targets::targets_model::SalesTarget;
use crate::users::users_model::{Role, User, UserDirectory};

pub struct QuotaAggregator<'a> {
    deals: &'a [Deal],
    targets: &'a [SalesTarget],
    directory: &'a UserDirectory,
}

impl<'a> QuotaAggregator<'a> {
    pub fn new(
        deals: &'a [Deal],
        targets: &'a [SalesTarget],
        directory: &'a UserDirectory,
    ) -> Self {
        QuotaAggregator {
            deals,
            targets,
            directory,
        }
    }

    /// Sum of deal values owned by `uid` within the financial year, optionally
    /// narrowed to one quarter. Deals without a parsable closed date stay out
    /// of both the quarter and the whole-year sums.
    pub fn achieved_amount(
        &self,
        uid: &str,
        financial_year: &FinancialYear,
        selection: QuarterSelection,
    ) -> Decimal {
        self.deals
            .iter()
            .filter(|deal| deal.assigned_to_uid == uid)
            .filter(|deal| match deal.closed_date.and_then(|d| financial_year.quarter_of(d)) {
                Some(quarter) => match selection {
                    QuarterSelection::All => true,
                    QuarterSelection::One(wanted) => quarter == wanted,
                },
                None => false,
            })
            .map(|deal| deal.total_cost)
            .sum()
    }

    /// The base target for one (year, quarter, uid) triple. Duplicate triples
    /// should not exist, but if the input carries any, the last row wins.
    fn base_target(&self, uid: &str, financial_year: &FinancialYear, quarter: Quarter) -> Decimal {
        self.targets
            .iter()
            .filter(|t| t.matches_triple(financial_year, quarter, uid))
            .last()
            .map(|t| t.target_amount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Target with unmet deficit carried forward from earlier quarters.
    ///
    /// Quarters are walked strictly Q1 to Q4, each one's shortfall (clamped
    /// at zero) inflating the next one's target. Surplus never rolls forward:
    /// beating one quarter does not soften the next. For the whole year the
    /// carry-forward nets out, so the annual adjusted target is just the sum
    /// of the four base targets.
    pub fn quarter_target_with_carry_forward(
        &self,
        uid: &str,
        financial_year: &FinancialYear,
        selection: QuarterSelection,
    ) -> QuarterPerformance {
        match selection {
            QuarterSelection::All => {
                let total_target: Decimal = Quarter::ORDERED
                    .iter()
                    .map(|q| self.base_target(uid, financial_year, *q))
                    .sum();
                let achieved = self.achieved_amount(uid, financial_year, QuarterSelection::All);
                QuarterPerformance {
                    adjusted_target: total_target,
                    achieved,
                    deficit: (total_target - achieved).max(Decimal::ZERO),
                }
            }
            QuarterSelection::One(requested) => {
                let mut carry_in = Decimal::ZERO;
                for quarter in Quarter::ORDERED {
                    let base = self.base_target(uid, financial_year, quarter);
                    let adjusted_target = base + carry_in;
                    let achieved =
                        self.achieved_amount(uid, financial_year, QuarterSelection::One(quarter));
                    let deficit = (adjusted_target - achieved).max(Decimal::ZERO);

                    if quarter == requested {
                        return QuarterPerformance {
                            adjusted_target,
                            achieved,
                            deficit,
                        };
                    }
                    carry_in = deficit;
                }
                QuarterPerformance::zeroed()
            }
        }
    }

    /// Group rollup: the element-wise sum of each member's own carried-forward
    /// result. Deficits are clamped per user before summing, so one member's
    /// surplus never offsets another's shortfall.
    pub fn combined_quarter_target(
        &self,
        uids: &[String],
        financial_year: &FinancialYear,
        selection: QuarterSelection,
    ) -> QuarterPerformance {
        let mut combined = QuarterPerformance::zeroed();
        for uid in uids {
            let member = self.quarter_target_with_carry_forward(uid, financial_year, selection);
            combined.combine(&member);
        }
        combined
    }

    /// The uids whose deals and targets feed a viewer's dashboard.
    ///
    /// Assistant Managers and Executives are always pinned to themselves,
    /// whatever scope or drill-down was asked for. A Head drilling into a
    /// Manager sees that Manager plus their direct reports; any other
    /// explicit selection narrows to the one user. Unknown viewers resolve
    /// to an empty set.
    pub fn resolve_effective_user_set(
        &self,
        viewer: &User,
        scope: ViewScope,
        team_selection: &TeamSelection,
    ) -> Vec<String> {
        if viewer.role.is_individual_contributor() {
            return vec![viewer.uid.clone()];
        }

        if let TeamSelection::User(selected_uid) = team_selection {
            if viewer.role == Role::Head {
                if let Some(selected) = self.directory.get(selected_uid) {
                    if selected.role == Role::Manager {
                        let mut uids = vec![selected.uid.clone()];
                        uids.extend(
                            self.directory
                                .direct_reports(&selected.uid)
                                .into_iter()
                                .map(|u| u.uid.clone()),
                        );
                        uids.sort();
                        uids.dedup();
                        return uids;
                    }
                }
            }
            return vec![selected_uid.clone()];
        }

        if scope == ViewScope::MyLeadsOnly {
            return vec![viewer.uid.clone()];
        }

        let mut uids: Vec<String> = match viewer.role {
            Role::Director | Role::Admin => self
                .directory
                .sales_staff()
                .into_iter()
                .map(|u| u.uid.clone())
                .collect(),
            Role::Head => self
                .directory
                .sales_managers()
                .into_iter()
                .map(|u| u.uid.clone())
                .collect(),
            Role::Manager => {
                let mut team = vec![viewer.uid.clone()];
                team.extend(
                    self.directory
                        .direct_reports(&viewer.uid)
                        .into_iter()
                        .map(|u| u.uid.clone()),
                );
                team
            }
            // Covered by the individual-contributor pin above.
            Role::AssistantManager | Role::Executive => vec![viewer.uid.clone()],
        };
        uids.sort();
        uids.dedup();
        uids
    }
}
