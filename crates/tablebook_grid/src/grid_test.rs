#[cfg(test)]
mod tests {
    use crate::api::mock::{ApiCall, InMemoryBookingApi};
    use crate::api::MockBookingApi;
    use crate::error::GridError;
    use crate::form::FormPatch;
    use crate::grid::{BookingGrid, CellState, GridEvent};
    use crate::models::{Booking, BookingDraft, BookingStatus};
    use crate::selection::SelectionState;
    use crate::slots::TimeSlotSequence;
    use crate::table::{TableId, TableLayout};
    use chrono::{NaiveDate, NaiveTime};
    use tablebook_config::SelectionMode;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()
    }

    fn t(id: &str) -> TableId {
        TableId::from(id)
    }

    fn booking(id: i64, table: &str, date: NaiveDate, start: usize, end: usize) -> Booking {
        Booking {
            id,
            details: BookingDraft {
                table: t(table),
                date,
                start,
                end,
                name: format!("guest {id}"),
                phone: "555-0000".to_string(),
                requested_count: 2,
                amount_fact: 0,
                from_who: String::new(),
                comment: String::new(),
                status: BookingStatus::Booked,
            },
        }
    }

    fn grid<A: crate::api::BookingApi>(api: A, mode: SelectionMode) -> BookingGrid<A> {
        let tables = TableLayout::new(vec![t("1"), t("2"), t("3")]).unwrap();
        BookingGrid::new(api, TimeSlotSequence::default(), tables, mode, day(), 60.0)
    }

    async fn loaded(bookings: Vec<Booking>) -> BookingGrid<InMemoryBookingApi> {
        let mut grid = grid(
            InMemoryBookingApi::with_bookings(bookings),
            SelectionMode::Drag,
        );
        grid.refresh().await.unwrap();
        grid
    }

    fn drag(grid: &mut BookingGrid<InMemoryBookingApi>, table: &str, from: usize, to: usize) {
        grid.pointer_down(&t(table), from).unwrap();
        grid.pointer_enter(&t(table), to).unwrap();
        grid.pointer_up();
    }

    #[tokio::test]
    async fn test_drag_opens_create_form() {
        let mut grid = loaded(vec![]).await;
        grid.pointer_down(&t("3"), 7).unwrap();
        grid.pointer_enter(&t("3"), 5).unwrap();
        grid.pointer_enter(&t("1"), 9).unwrap();
        assert_eq!(grid.cell_state(&t("3"), 6), CellState::Selected);
        assert_eq!(grid.cell_state(&t("1"), 9), CellState::Free);
        grid.pointer_up();

        let form = grid.state().form.as_ref().expect("form should be open");
        assert_eq!(form.id, None);
        assert_eq!(form.table, t("3"));
        assert_eq!((form.start, form.end), (5, 8));
        assert_eq!(form.date, day());
        assert!(grid.state().selection.pending().is_some());
    }

    #[tokio::test]
    async fn test_pointer_down_on_booking_opens_edit() {
        let mut grid = loaded(vec![booking(1, "2", day(), 2, 4)]).await;
        grid.pointer_down(&t("2"), 3).unwrap();

        let form = grid.state().form.as_ref().unwrap();
        assert_eq!(form.id, Some(1));
        assert_eq!(form.name, "guest 1");
        assert!(grid.state().selection.is_idle());
    }

    #[tokio::test]
    async fn test_pointer_input_ignored_while_form_open() {
        let mut grid = loaded(vec![]).await;
        drag(&mut grid, "1", 0, 1);
        let before = grid.state().form.clone();

        grid.pointer_down(&t("2"), 10).unwrap();
        grid.pointer_up();
        grid.cell_click(&t("2"), 10).unwrap();

        assert_eq!(grid.state().form, before);
    }

    #[tokio::test]
    async fn test_two_click_mode() {
        let mut grid = grid(InMemoryBookingApi::new(), SelectionMode::TwoClick);
        grid.pointer_down(&t("1"), 6).unwrap();
        assert!(grid.state().selection.is_idle());

        grid.cell_click(&t("1"), 6).unwrap();
        assert_eq!(grid.cell_state(&t("1"), 6), CellState::Anchor);
        assert_eq!(grid.cell_state(&t("1"), 5), CellState::Free);
        assert!(grid.state().form.is_none());

        grid.cell_click(&t("1"), 3).unwrap();
        let form = grid.state().form.as_ref().unwrap();
        assert_eq!((form.start, form.end), (3, 7));
        assert_eq!(grid.cell_state(&t("1"), 4), CellState::Selected);
    }

    #[tokio::test]
    async fn test_cell_click_opens_booking_in_drag_mode() {
        let mut grid = loaded(vec![booking(4, "1", day(), 0, 2)]).await;
        grid.cell_click(&t("1"), 1).unwrap();
        assert_eq!(grid.state().form.as_ref().and_then(|f| f.id), Some(4));
    }

    #[tokio::test]
    async fn test_handle_dispatches_events() {
        let mut grid = loaded(vec![]).await;
        grid.handle(GridEvent::PointerDown {
            table: t("2"),
            slot: 1,
        })
        .unwrap();
        grid.handle(GridEvent::PointerEnter {
            table: t("2"),
            slot: 2,
        })
        .unwrap();
        grid.handle(GridEvent::PointerUp).unwrap();

        assert!(matches!(
            grid.state().selection.state(),
            SelectionState::PendingConfirm { .. }
        ));
        assert_eq!(grid.state().form.as_ref().map(|f| (f.start, f.end)), Some((1, 3)));
    }

    #[tokio::test]
    async fn test_submit_without_phone_makes_no_request() {
        let mut api = MockBookingApi::new();
        api.expect_create().times(0);
        api.expect_update().times(0);
        api.expect_list_by_date().times(0);

        let mut grid = grid(api, SelectionMode::Drag);
        grid.pointer_down(&t("1"), 0).unwrap();
        grid.pointer_up();
        grid.update_form(FormPatch::default().name("Ivan")).unwrap();

        let err = grid.submit_form().await.unwrap_err();
        assert!(err.is_validation());
        assert!(grid.state().form.is_some());
        let notice = grid.state().notice.as_ref().unwrap();
        assert!(notice.message.contains("phone"));
    }

    #[tokio::test]
    async fn test_submit_creates_and_refetches() {
        let mut grid = loaded(vec![]).await;
        drag(&mut grid, "3", 4, 7);
        grid.update_form(FormPatch::default().name("Ivan").phone("555-1111"))
            .unwrap();

        let saved = grid.submit_form().await.unwrap();
        assert_eq!((saved.details.start, saved.details.end), (4, 8));
        assert!(grid.state().form.is_none());
        assert!(grid.state().selection.is_idle());
        assert_eq!(grid.state().bookings, vec![saved]);
        assert_eq!(grid.cell_state(&t("3"), 7), CellState::Booked);

        let calls = grid.api().calls();
        assert!(matches!(calls[1], ApiCall::Create(_)));
        assert_eq!(calls[2], ApiCall::ListByDate(day()));
    }

    #[tokio::test]
    async fn test_conflict_keeps_form_open() {
        let mut grid = loaded(vec![booking(1, "1", day(), 2, 4)]).await;
        drag(&mut grid, "1", 5, 3);
        grid.update_form(FormPatch::default().name("Ivan").phone("555"))
            .unwrap();

        let err = grid.submit_form().await.unwrap_err();
        assert_eq!(
            err,
            GridError::Api {
                status: 400,
                detail: "Time slot conflict".to_string()
            }
        );
        assert_eq!(
            grid.state().notice.as_ref().map(|n| n.message.as_str()),
            Some("Time slot conflict")
        );
        assert!(grid.state().form.is_some());
        assert_eq!(grid.state().bookings.len(), 1);
    }

    #[tokio::test]
    async fn test_edit_moves_booking_end() {
        let mut grid = loaded(vec![booking(1, "2", day(), 2, 4)]).await;
        grid.cell_click(&t("2"), 2).unwrap();
        grid.update_form(FormPatch::default().end(6)).unwrap();

        let saved = grid.submit_form().await.unwrap();
        assert_eq!((saved.details.start, saved.details.end), (2, 6));
        assert_eq!(grid.cell_state(&t("2"), 5), CellState::Booked);
        assert_eq!(grid.cell_state(&t("2"), 6), CellState::Free);

        let update = grid
            .api()
            .calls()
            .into_iter()
            .find_map(|call| match call {
                ApiCall::Update(id, draft) => Some((id, draft.start, draft.end)),
                _ => None,
            });
        assert_eq!(update, Some((1, 2, 6)));
    }

    #[tokio::test]
    async fn test_reversed_interval_makes_no_request() {
        let mut api = MockBookingApi::new();
        api.expect_create().times(0);
        api.expect_update().times(0);

        let mut grid = grid(api, SelectionMode::Drag);
        grid.pointer_down(&t("1"), 3).unwrap();
        grid.pointer_up();
        let patch = FormPatch::default().name("Ivan").phone("555").start(5).end(5);
        grid.update_form(patch).unwrap();

        let err = grid.submit_form().await.unwrap_err();
        assert!(err.is_validation());
        assert!(grid.state().notice.is_some());
        assert_eq!(grid.state().form.as_ref().map(|f| (f.start, f.end)), Some((5, 5)));
    }

    #[tokio::test]
    async fn test_form_interval_must_fit_the_day() {
        let mut grid = loaded(vec![]).await;
        drag(&mut grid, "1", 30, 31);

        assert_eq!(
            grid.update_form(FormPatch::default().end(37)),
            Err(GridError::InvalidSlot {
                index: 37,
                count: 36
            })
        );
        assert_eq!(
            grid.update_form(FormPatch::default().start(36)),
            Err(GridError::InvalidSlot {
                index: 36,
                count: 36
            })
        );
        grid.update_form(FormPatch::default().end(36)).unwrap();
        assert_eq!(grid.state().form.as_ref().map(|f| (f.start, f.end)), Some((30, 36)));
    }

    #[tokio::test]
    async fn test_delete_open_booking() {
        let mut grid = loaded(vec![booking(1, "2", day(), 2, 4)]).await;
        grid.cell_click(&t("2"), 2).unwrap();
        grid.delete_open_booking().await.unwrap();

        assert!(grid.state().form.is_none());
        assert!(grid.state().bookings.is_empty());
        assert_eq!(grid.cell_state(&t("2"), 2), CellState::Free);
        assert!(grid.api().calls().contains(&ApiCall::Delete(1)));
    }

    #[tokio::test]
    async fn test_delete_needs_existing_booking() {
        let mut grid = loaded(vec![]).await;
        assert_eq!(grid.delete_open_booking().await, Err(GridError::NoOpenForm));

        drag(&mut grid, "1", 0, 0);
        assert_eq!(
            grid.delete_open_booking().await,
            Err(GridError::NoOpenBooking)
        );
    }

    #[tokio::test]
    async fn test_mark_occupied() {
        let mut grid = loaded(vec![booking(1, "2", day(), 2, 4)]).await;
        grid.cell_click(&t("2"), 3).unwrap();

        let saved = grid.mark_open_booking_occupied().await.unwrap();
        assert_eq!(saved.status(), BookingStatus::Occupied);
        assert!(grid.state().form.is_none());
        assert_eq!(grid.cell_state(&t("2"), 3), CellState::Occupied);
    }

    #[tokio::test]
    async fn test_mark_occupied_failure_restores_status() {
        let mut grid = loaded(vec![booking(1, "2", day(), 2, 4)]).await;
        grid.cell_click(&t("2"), 3).unwrap();
        grid.api()
            .fail_next(GridError::Transport("connection refused".to_string()));

        assert!(grid.mark_open_booking_occupied().await.is_err());
        let form = grid.state().form.as_ref().unwrap();
        assert_eq!(form.status, BookingStatus::Booked);
        assert!(grid.state().notice.is_some());
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_bookings() {
        let mut grid = loaded(vec![booking(1, "1", day(), 0, 1)]).await;
        grid.api()
            .fail_next(GridError::Transport("connection refused".to_string()));

        assert!(grid.refresh().await.is_err());
        assert_eq!(grid.state().bookings.len(), 1);
        assert_eq!(
            grid.state().notice.as_ref().map(|n| n.message.clone()),
            Some("Booking service unreachable: connection refused".to_string())
        );

        grid.dismiss_notice();
        assert!(grid.state().notice.is_none());
    }

    #[tokio::test]
    async fn test_shift_date_reloads_and_cancels() {
        let next = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let mut grid = loaded(vec![booking(1, "1", day(), 0, 2), booking(2, "1", next, 4, 6)]).await;
        drag(&mut grid, "2", 0, 1);

        grid.shift_date(1).await.unwrap();
        assert_eq!(grid.state().date, next);
        assert!(grid.state().form.is_none());
        assert!(grid.state().selection.is_idle());
        assert_eq!(grid.state().bookings.len(), 1);
        assert_eq!(grid.cell_state(&t("1"), 4), CellState::Booked);
        assert_eq!(grid.cell_state(&t("1"), 0), CellState::Free);

        grid.shift_date(-1).await.unwrap();
        assert_eq!(grid.state().date, day());
    }

    #[tokio::test]
    async fn test_now_offset_follows_viewport() {
        let mut grid = grid(InMemoryBookingApi::new(), SelectionMode::Drag);
        grid.scroll(100.0);
        assert_eq!(grid.state().now_offset, None);

        grid.tick(NaiveTime::from_hms_opt(13, 0, 0).unwrap());
        assert_eq!(grid.state().now_offset, Some(20.0));

        grid.scroll(-5.0);
        assert_eq!(grid.state().scroll_offset, 0.0);
        assert_eq!(grid.state().now_offset, Some(120.0));

        grid.resize(30.0);
        assert_eq!(grid.state().now_offset, Some(60.0));

        grid.handle(GridEvent::Resize(0.0)).unwrap();
        assert_eq!(grid.state().now_offset, None);
    }

    #[tokio::test]
    async fn test_rejects_unknown_cells() {
        let mut grid = grid(InMemoryBookingApi::new(), SelectionMode::Drag);
        assert_eq!(
            grid.pointer_down(&t("X"), 0),
            Err(GridError::UnknownTable("X".to_string()))
        );
        assert_eq!(
            grid.cell_click(&t("1"), 36),
            Err(GridError::InvalidSlot {
                index: 36,
                count: 36
            })
        );
        assert!(grid.state().selection.is_idle());
    }

    #[tokio::test]
    async fn test_update_form_without_form() {
        let mut grid = grid(InMemoryBookingApi::new(), SelectionMode::Drag);
        assert_eq!(
            grid.update_form(FormPatch::default().name("Ivan")),
            Err(GridError::NoOpenForm)
        );
    }

    #[tokio::test]
    async fn test_cancel_form_resets_selection() {
        let mut grid = loaded(vec![]).await;
        drag(&mut grid, "1", 2, 4);
        grid.cancel_form();
        assert!(grid.state().form.is_none());
        assert!(grid.state().selection.is_idle());
        assert_eq!(grid.cell_state(&t("1"), 3), CellState::Free);
    }

    #[tokio::test]
    async fn test_view_state_serializes() {
        let mut grid = loaded(vec![booking(1, "1", day(), 0, 2)]).await;
        drag(&mut grid, "2", 1, 1);

        let value = serde_json::to_value(grid.state()).unwrap();
        assert_eq!(value["date"], "2025-03-08");
        assert_eq!(value["bookings"][0]["reqAmount"], 2);
        assert_eq!(value["selection"]["state"]["state"], "pending_confirm");
        assert_eq!(value["form"]["start"], 1);
    }
}
