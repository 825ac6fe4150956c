//! Comprehensive tests for domain_sales

use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_sales::{AvailabilityResolver, Invoice, InvoiceForm, LineItem, SalesError};
use test_utils::{greenfield_catalog, InvoiceBuilder};

// ============================================================================
// Availability Tests
// ============================================================================

mod availability_tests {
    use super::*;

    #[test]
    fn test_claimed_plot_is_withheld_from_other_invoices() {
        let catalog = greenfield_catalog();
        let siblings = vec![InvoiceBuilder::new()
            .claiming("Greenfield Phase 1", "A1")
            .build()];

        let resolver = AvailabilityResolver::new(&catalog, &siblings);
        let numbers: Vec<&str> = resolver
            .available_plots("Greenfield Phase 1")
            .iter()
            .map(|p| p.plot_number.as_str())
            .collect();

        assert_eq!(numbers, vec!["A2"]);
    }

    #[test]
    fn test_editing_invoice_keeps_its_own_plot() {
        let catalog = greenfield_catalog();
        let mine = InvoiceBuilder::new()
            .claiming("Greenfield Phase 1", "A1")
            .build();
        let my_id = mine.id;
        let siblings = vec![
            mine,
            InvoiceBuilder::new()
                .claiming("Greenfield Phase 1", "A2")
                .build(),
        ];

        let resolver = AvailabilityResolver::new(&catalog, &siblings).excluding(my_id);
        let numbers: Vec<&str> = resolver
            .available_plots("Greenfield Phase 1")
            .iter()
            .map(|p| p.plot_number.as_str())
            .collect();

        // A1 is mine again; A2 stays claimed by the other invoice
        assert_eq!(numbers, vec!["A1"]);
    }

    #[test]
    fn test_claims_are_scoped_to_the_property() {
        let catalog = greenfield_catalog();
        // Plot number collides across properties; only the matching property counts
        let siblings = vec![InvoiceBuilder::new()
            .claiming("Greenfield Phase 2", "A1")
            .build()];

        let resolver = AvailabilityResolver::new(&catalog, &siblings);
        assert!(resolver.is_available("Greenfield Phase 1", "A1"));
    }

    #[test]
    fn test_double_booked_plot_stays_excluded() {
        let catalog = greenfield_catalog();
        // Bad pre-existing data: two invoices claim A1
        let siblings = vec![
            InvoiceBuilder::new().claiming("Greenfield Phase 1", "A1").build(),
            InvoiceBuilder::new().claiming("Greenfield Phase 1", "A1").build(),
        ];

        let resolver = AvailabilityResolver::new(&catalog, &siblings);
        assert!(!resolver.is_available("Greenfield Phase 1", "A1"));
    }

    #[test]
    fn test_output_order_is_stable_under_invoice_order() {
        let catalog = greenfield_catalog();
        let a = InvoiceBuilder::new().claiming("Greenfield Phase 1", "A2").build();
        let b = InvoiceBuilder::new().claiming("Greenfield Phase 2", "B1").build();

        let forward = vec![a.clone(), b.clone()];
        let backward = vec![b, a];

        let from_forward: Vec<String> = AvailabilityResolver::new(&catalog, &forward)
            .available_plots("Greenfield Phase 1")
            .iter()
            .map(|p| p.plot_number.clone())
            .collect();
        let from_backward: Vec<String> = AvailabilityResolver::new(&catalog, &backward)
            .available_plots("Greenfield Phase 1")
            .iter()
            .map(|p| p.plot_number.clone())
            .collect();

        assert_eq!(from_forward, from_backward);
    }

    #[test]
    fn test_unknown_property_yields_empty_set() {
        let catalog = greenfield_catalog();
        let siblings: Vec<Invoice> = Vec::new();
        let resolver = AvailabilityResolver::new(&catalog, &siblings);
        assert!(resolver.available_plots("Nowhere").is_empty());
    }
}

// ============================================================================
// Line Item Cascade Tests
// ============================================================================

mod line_item_tests {
    use super::*;

    #[test]
    fn test_property_selection_prefills_default_price() {
        let catalog = greenfield_catalog();
        let mut item = LineItem::new();

        item.set_property("Greenfield Phase 2", &catalog);

        assert_eq!(item.price_per_cent, Money::new(dec!(125000)));
        assert!(!item.has_plot());
        assert!(item.total_amount.is_zero());
        assert!(item.final_amount.is_zero());
    }

    #[test]
    fn test_property_change_invalidates_plot() {
        let catalog = greenfield_catalog();
        let siblings: Vec<Invoice> = Vec::new();
        let resolver = AvailabilityResolver::new(&catalog, &siblings);

        let mut item = LineItem::new();
        item.set_property("Greenfield Phase 1", &catalog);
        item.set_plot("A1", &resolver).unwrap();
        assert_eq!(item.total_amount, Money::new(dec!(500000)));

        item.set_property("Greenfield Phase 2", &catalog);
        assert!(!item.has_plot());
        assert_eq!(item.area, dec!(0));
        assert!(item.total_amount.is_zero());
    }

    #[test]
    fn test_plot_selection_copies_area_and_prices_out() {
        let catalog = greenfield_catalog();
        let siblings: Vec<Invoice> = Vec::new();
        let resolver = AvailabilityResolver::new(&catalog, &siblings);

        let mut item = LineItem::new();
        item.set_property("Greenfield Phase 1", &catalog);
        item.set_plot("A2", &resolver).unwrap();

        assert_eq!(item.area, dec!(3));
        assert_eq!(item.total_amount, Money::new(dec!(300000)));
        assert_eq!(item.final_amount, Money::new(dec!(300000)));
    }

    #[test]
    fn test_sold_plot_is_rejected_and_item_unchanged() {
        let catalog = greenfield_catalog();
        let siblings = vec![InvoiceBuilder::new()
            .claiming("Greenfield Phase 1", "A1")
            .build()];
        let resolver = AvailabilityResolver::new(&catalog, &siblings);

        let mut item = LineItem::new();
        item.set_property("Greenfield Phase 1", &catalog);
        let before = item.clone();

        let err = item.set_plot("A1", &resolver).unwrap_err();
        assert_eq!(
            err,
            SalesError::PlotUnavailable {
                property: "Greenfield Phase 1".to_string(),
                plot_number: "A1".to_string(),
            }
        );
        assert_eq!(item, before);
    }

    #[test]
    fn test_manual_overrides_keep_derived_fields_exact() {
        let catalog = greenfield_catalog();
        let siblings: Vec<Invoice> = Vec::new();
        let resolver = AvailabilityResolver::new(&catalog, &siblings);

        let mut item = LineItem::new();
        item.set_property("Greenfield Phase 1", &catalog);
        item.set_plot("A1", &resolver).unwrap();

        // Negotiated price and a discount
        item.set_price_per_cent(Money::new(dec!(90000)));
        assert_eq!(item.total_amount, Money::new(dec!(450000)));

        item.set_discount(Money::new(dec!(50000)));
        assert_eq!(item.final_amount, Money::new(dec!(400000)));

        // Discount edit leaves the total untouched
        assert_eq!(item.total_amount, Money::new(dec!(450000)));
    }

    #[test]
    fn test_setters_are_idempotent() {
        let catalog = greenfield_catalog();
        let siblings: Vec<Invoice> = Vec::new();
        let resolver = AvailabilityResolver::new(&catalog, &siblings);

        let mut once = LineItem::new();
        once.set_property("Greenfield Phase 1", &catalog);
        once.set_plot("A1", &resolver).unwrap();
        once.set_discount(Money::new(dec!(10000)));

        let mut twice = once.clone();
        twice.set_plot("A1", &resolver).unwrap();
        twice.set_discount(Money::new(dec!(10000)));

        assert_eq!(once, twice);
    }
}

// ============================================================================
// Form Session Tests
// ============================================================================

mod form_tests {
    use super::*;
    use domain_sales::InvoiceStatus;

    fn claimed_sibling() -> Invoice {
        InvoiceBuilder::new()
            .claiming("Greenfield Phase 1", "A1")
            .build()
    }

    #[test]
    fn test_create_flow_end_to_end() {
        let mut form = InvoiceForm::create(greenfield_catalog(), vec![claimed_sibling()]);
        form.set_customer_name("Asha Verma");
        form.set_project_name("Greenfield");

        let line = form.line_items()[0].id;
        form.set_property(line, "Greenfield Phase 1").unwrap();

        // A1 is taken by the sibling, so only A2 is on offer
        let offered: Vec<&str> = form
            .available_plots("Greenfield Phase 1")
            .iter()
            .map(|p| p.plot_number.as_str())
            .collect();
        assert_eq!(offered, vec!["A2"]);

        assert_eq!(
            form.set_plot(line, "A1"),
            Err(SalesError::PlotUnavailable {
                property: "Greenfield Phase 1".to_string(),
                plot_number: "A1".to_string(),
            })
        );
        form.set_plot(line, "A2").unwrap();
        assert_eq!(form.grand_total(), Money::new(dec!(300000)));

        form.set_token(Money::new(dec!(100000)));
        form.set_agreement_due(Money::new(dec!(150000)));
        assert_eq!(form.remaining(), Money::zero());

        let invoice = form.into_invoice().unwrap();
        assert_eq!(invoice.customer_name, "Asha Verma");
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.grand_total(), Money::new(dec!(300000)));
        assert_eq!(invoice.schedule.registration_amount, Money::new(dec!(50000)));
    }

    #[test]
    fn test_edit_mode_excludes_itself() {
        let catalog = greenfield_catalog();
        let mut mine = InvoiceBuilder::new()
            .with_customer_name("Ravi Kumar")
            .claiming("Greenfield Phase 1", "A1")
            .build();
        mine.line_items[0].set_area(dec!(5));
        mine.line_items[0].set_price_per_cent(Money::new(dec!(100000)));
        let siblings = vec![mine.clone()];

        let mut form = InvoiceForm::edit(catalog, siblings, mine);
        let line = form.line_items()[0].id;

        // Re-selecting its own plot succeeds in edit mode
        form.set_plot(line, "A1").unwrap();
        assert_eq!(form.grand_total(), Money::new(dec!(500000)));
    }

    #[test]
    fn test_payment_stages_follow_the_worked_example() {
        let mut form = InvoiceForm::create(greenfield_catalog(), Vec::new());
        form.set_customer_name("Asha Verma");

        let line = form.line_items()[0].id;
        form.set_area(line, dec!(9)).unwrap();
        form.set_price_per_cent(line, Money::new(dec!(100000))).unwrap();
        assert_eq!(form.grand_total(), Money::new(dec!(900000)));

        form.set_token(Money::new(dec!(300000)));
        let invoice_view = form.clone().into_invoice().unwrap();
        assert_eq!(invoice_view.schedule.agreement_amount, Money::new(dec!(600000)));
        assert_eq!(invoice_view.schedule.registration_amount, Money::zero());

        form.set_agreement_due(Money::new(dec!(400000)));
        assert_eq!(form.remaining(), Money::zero());
        let invoice = form.into_invoice().unwrap();
        assert_eq!(invoice.schedule.registration_amount, Money::new(dec!(200000)));
    }

    #[test]
    fn test_grand_total_drift_shows_in_remaining() {
        let mut form = InvoiceForm::create(greenfield_catalog(), Vec::new());
        form.set_customer_name("Asha Verma");

        let line = form.line_items()[0].id;
        form.set_area(line, dec!(9)).unwrap();
        form.set_price_per_cent(line, Money::new(dec!(100000))).unwrap();
        form.set_token(Money::new(dec!(300000)));
        form.set_agreement_due(Money::new(dec!(600000)));
        assert_eq!(form.remaining(), Money::zero());

        // Editing the line item afterwards leaves the stages frozen
        form.set_area(line, dec!(7)).unwrap();
        assert_eq!(form.grand_total(), Money::new(dec!(700000)));
        assert_eq!(form.remaining(), Money::new(dec!(-200000)));
    }

    #[test]
    fn test_submit_requires_customer_name() {
        let mut form = InvoiceForm::create(greenfield_catalog(), Vec::new());
        let line = form.line_items()[0].id;
        form.set_area(line, dec!(1)).unwrap();
        form.set_price_per_cent(line, Money::new(dec!(1000))).unwrap();

        assert!(matches!(
            form.into_invoice(),
            Err(SalesError::Validation(_))
        ));
    }

    #[test]
    fn test_submit_requires_line_item_content() {
        let mut form = InvoiceForm::create(greenfield_catalog(), Vec::new());
        form.set_customer_name("Asha Verma");

        // The opening blank row carries neither a plot nor an amount
        assert!(matches!(
            form.into_invoice(),
            Err(SalesError::Validation(_))
        ));
    }

    #[test]
    fn test_line_item_management() {
        let mut form = InvoiceForm::create(greenfield_catalog(), Vec::new());
        assert_eq!(form.line_items().len(), 1);

        let extra = form.add_line_item();
        assert_eq!(form.line_items().len(), 2);

        form.remove_line_item(extra).unwrap();
        assert_eq!(form.line_items().len(), 1);

        assert_eq!(
            form.remove_line_item(extra),
            Err(SalesError::LineItemNotFound(extra))
        );
        assert_eq!(
            form.set_area(extra, dec!(1)),
            Err(SalesError::LineItemNotFound(extra))
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    #[derive(Debug, Clone)]
    enum LineOp {
        Area(i64),
        Price(i64),
        Discount(i64),
    }

    fn line_op() -> impl Strategy<Value = LineOp> {
        prop_oneof![
            (-100i64..1000).prop_map(LineOp::Area),
            (-10_000i64..1_000_000).prop_map(LineOp::Price),
            (-10_000i64..10_000_000).prop_map(LineOp::Discount),
        ]
    }

    fn apply(item: &mut LineItem, op: &LineOp) {
        match op {
            LineOp::Area(a) => item.set_area(Decimal::new(*a, 0)),
            LineOp::Price(p) => item.set_price_per_cent(Money::from_rupees(*p)),
            LineOp::Discount(d) => item.set_discount(Money::from_rupees(*d)),
        }
    }

    proptest! {
        #[test]
        fn cascade_invariants_hold_after_any_edit_sequence(
            ops in prop::collection::vec(line_op(), 1..20)
        ) {
            let mut item = LineItem::new();
            for op in &ops {
                apply(&mut item, op);

                prop_assert_eq!(item.total_amount, item.price_per_cent * item.area);
                prop_assert_eq!(item.final_amount, item.total_amount - item.discount);
                prop_assert!(item.discount >= Money::zero());
                prop_assert!(item.discount <= item.total_amount);
                prop_assert!(item.final_amount >= Money::zero());
            }
        }

        #[test]
        fn line_setters_are_idempotent(ops in prop::collection::vec(line_op(), 1..10)) {
            let mut item = LineItem::new();
            for op in &ops {
                apply(&mut item, op);
                let once = item.clone();
                apply(&mut item, op);
                prop_assert_eq!(&item, &once);
            }
        }
    }

    #[derive(Debug, Clone)]
    enum StageOp {
        Token(i64),
        Agreement(i64),
        Registration(i64),
    }

    fn stage_op() -> impl Strategy<Value = StageOp> {
        prop_oneof![
            (-100_000i64..2_000_000).prop_map(StageOp::Token),
            (-100_000i64..2_000_000).prop_map(StageOp::Agreement),
            (-100_000i64..2_000_000).prop_map(StageOp::Registration),
        ]
    }

    fn apply_stage(schedule: &mut domain_sales::PaymentSchedule, op: &StageOp, grand_total: Money) {
        match op {
            StageOp::Token(a) => schedule.set_token(Money::from_rupees(*a), grand_total),
            StageOp::Agreement(a) => {
                schedule.set_agreement_due(Money::from_rupees(*a), grand_total)
            }
            StageOp::Registration(a) => {
                schedule.set_registration_due(Money::from_rupees(*a), grand_total)
            }
        }
    }

    proptest! {
        #[test]
        fn schedule_invariant_holds_at_fixed_grand_total(
            total in 0i64..10_000_000,
            ops in prop::collection::vec(stage_op(), 1..20)
        ) {
            use domain_sales::PaymentSchedule;

            let grand_total = Money::from_rupees(total);
            let mut schedule = PaymentSchedule::new();

            for op in &ops {
                apply_stage(&mut schedule, op, grand_total);

                let sum = schedule.allocated() + schedule.remaining(grand_total);
                prop_assert_eq!(sum, grand_total);
                prop_assert!(schedule.token_amount >= Money::zero());
                prop_assert!(schedule.agreement_amount >= Money::zero());
                prop_assert!(schedule.registration_amount >= Money::zero());
                prop_assert!(schedule.allocated() <= grand_total);
            }
        }

        #[test]
        fn stage_setters_are_idempotent(
            total in 0i64..10_000_000,
            ops in prop::collection::vec(stage_op(), 1..20)
        ) {
            use domain_sales::PaymentSchedule;

            let grand_total = Money::from_rupees(total);
            let mut schedule = PaymentSchedule::new();

            for op in &ops {
                apply_stage(&mut schedule, op, grand_total);
                let once = schedule.clone();
                apply_stage(&mut schedule, op, grand_total);
                prop_assert_eq!(&schedule, &once);
            }
        }
    }
}

// ============================================================================
// Store Port Tests
// ============================================================================

mod port_tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use core_kernel::{DomainPort, InvoiceId, PortError};
    use domain_sales::InvoiceStore;

    /// In-memory adapter standing in for the remote invoice store
    #[derive(Default)]
    struct InMemoryInvoiceStore {
        invoices: Mutex<HashMap<InvoiceId, Invoice>>,
    }

    impl DomainPort for InMemoryInvoiceStore {}

    #[async_trait]
    impl InvoiceStore for InMemoryInvoiceStore {
        async fn list(&self) -> Result<Vec<Invoice>, PortError> {
            Ok(self.invoices.lock().unwrap().values().cloned().collect())
        }

        async fn get(&self, id: InvoiceId) -> Result<Invoice, PortError> {
            self.invoices
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Invoice", id))
        }

        async fn create(&self, invoice: &Invoice) -> Result<InvoiceId, PortError> {
            let mut invoices = self.invoices.lock().unwrap();
            if invoices.contains_key(&invoice.id) {
                return Err(PortError::conflict(format!(
                    "invoice {} already exists",
                    invoice.id
                )));
            }
            invoices.insert(invoice.id, invoice.clone());
            Ok(invoice.id)
        }

        async fn update(&self, id: InvoiceId, invoice: &Invoice) -> Result<(), PortError> {
            let mut invoices = self.invoices.lock().unwrap();
            if !invoices.contains_key(&id) {
                return Err(PortError::not_found("Invoice", id));
            }
            invoices.insert(id, invoice.clone());
            Ok(())
        }

        async fn delete(&self, id: InvoiceId) -> Result<(), PortError> {
            self.invoices
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Invoice", id))
        }
    }

    #[tokio::test]
    async fn test_submit_then_edit_round_trip() {
        let store = InMemoryInvoiceStore::default();

        // Build and submit a first invoice claiming A1
        let mut form = InvoiceForm::create(greenfield_catalog(), store.list().await.unwrap());
        form.set_customer_name("Asha Verma");
        let line = form.line_items()[0].id;
        form.set_property(line, "Greenfield Phase 1").unwrap();
        form.set_plot(line, "A1").unwrap();
        let first = form.into_invoice().unwrap();
        let first_id = store.create(&first).await.unwrap();

        // A second invoice can no longer take A1
        let mut second = InvoiceForm::create(greenfield_catalog(), store.list().await.unwrap());
        second.set_customer_name("Ravi Kumar");
        let line = second.line_items()[0].id;
        second.set_property(line, "Greenfield Phase 1").unwrap();
        assert!(second.set_plot(line, "A1").is_err());
        second.set_plot(line, "A2").unwrap();
        store.create(&second.into_invoice().unwrap()).await.unwrap();

        // Editing the first invoice keeps A1 available to itself
        let stored = store.get(first_id).await.unwrap();
        let mut edit = InvoiceForm::edit(greenfield_catalog(), store.list().await.unwrap(), stored);
        let line = edit.line_items()[0].id;
        edit.set_plot(line, "A1").unwrap();
        let updated = edit.into_invoice().unwrap();
        store.update(first_id, &updated).await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_invoice_is_not_found() {
        let store = InMemoryInvoiceStore::default();
        let err = store.get(InvoiceId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
