//! Tests de integración del servicio de transiciones
//!
//! Corren el orquestador contra la implementación en memoria de los
//! puertos, que respeta el mismo contrato CAS que PostgreSQL.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Barrier;
use uuid::Uuid;

use freight_dispatch::lifecycle::{LifecycleRegistry, ViajeStatus};
use freight_dispatch::models::auth::{CallerContext, UserRole};
use freight_dispatch::models::despacho::{Despacho, DespachoStatus};
use freight_dispatch::models::transition::ViajeTransition;
use freight_dispatch::models::viaje::Viaje;
use freight_dispatch::services::memory_store::{CountingNotifier, FailingNotifier, MemoryStore};
use freight_dispatch::services::store::{Notifier, TransitionCommit, ViajeStore};
use freight_dispatch::services::viaje_state_service::ViajeStateService;
use freight_dispatch::utils::errors::AppError;

fn caller(role: UserRole) -> CallerContext {
    CallerContext {
        caller_id: Uuid::new_v4(),
        role,
    }
}

fn make_despacho() -> Despacho {
    let now = Utc::now();
    Despacho {
        id: Uuid::new_v4(),
        reference: "DSP-2026-00001".to_string(),
        origin: "Rosario".to_string(),
        destination: "Córdoba".to_string(),
        scheduled_start: now + Duration::hours(2),
        scheduled_end: now + Duration::hours(12),
        status: DespachoStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

fn make_viaje(despacho: &Despacho, sequence_number: i32, status: ViajeStatus) -> Viaje {
    let now = Utc::now();
    Viaje {
        id: Uuid::new_v4(),
        despacho_id: despacho.id,
        status,
        sequence_number,
        carrier_id: None,
        driver_id: None,
        vehicle_id: None,
        trailer_id: None,
        scheduled_start: despacho.scheduled_start,
        scheduled_end: despacho.scheduled_end,
        cancelled_from: None,
        created_at: now,
        updated_at: now,
    }
}

async fn setup(status: ViajeStatus) -> (Arc<MemoryStore>, ViajeStateService, Despacho, Viaje) {
    let store = Arc::new(MemoryStore::new());
    let despacho = make_despacho();
    let viaje = make_viaje(&despacho, 1, status);
    store.insert_despacho(despacho.clone()).await;
    store.insert_viaje(viaje.clone()).await;

    let service = ViajeStateService::new(
        store.clone() as Arc<dyn ViajeStore>,
        Arc::new(CountingNotifier::default()),
        LifecycleRegistry::standard(),
    );

    (store, service, despacho, viaje)
}

#[tokio::test]
async fn test_dispatcher_assigns_carrier_and_progress_rises() {
    let (store, service, despacho, viaje) = setup(ViajeStatus::Pending).await;
    let registry = LifecycleRegistry::standard();

    let before = registry.progress_of(viaje.status);
    let outcome = service
        .apply_transition(
            viaje.id,
            ViajeStatus::CarrierAssigned,
            &caller(UserRole::Dispatcher),
            None,
        )
        .await
        .unwrap();

    assert_eq!(outcome.previous_status, ViajeStatus::Pending);
    assert_eq!(outcome.new_status, ViajeStatus::CarrierAssigned);
    assert_eq!(before, 0);
    assert!(registry.progress_of(outcome.new_status) > before);

    // El despacho refleja el avance del viaje
    assert_eq!(
        store.despacho(despacho.id).await.unwrap().status,
        DespachoStatus::InProgress
    );
}

#[tokio::test]
async fn test_skipping_assignment_fails_naming_both_states() {
    let (_store, service, _despacho, viaje) = setup(ViajeStatus::Pending).await;

    let err = service
        .apply_transition(
            viaje.id,
            ViajeStatus::Loading,
            &caller(UserRole::Admin),
            None,
        )
        .await
        .unwrap_err();

    match &err {
        AppError::InvalidTransition { from, to } => {
            assert_eq!(*from, ViajeStatus::Pending);
            assert_eq!(*to, ViajeStatus::Loading);
        }
        other => panic!("Se esperaba InvalidTransition, hubo {:?}", other),
    }
    assert!(err.to_string().contains("pending"));
    assert!(err.to_string().contains("loading"));
}

#[tokio::test]
async fn test_supervisor_cancels_outside_forward_chain() {
    let (store, service, _despacho, viaje) = setup(ViajeStatus::DriverConfirmed).await;

    let outcome = service
        .apply_transition(
            viaje.id,
            ViajeStatus::Cancelled,
            &caller(UserRole::Supervisor),
            Some("Cliente dio de baja la carga".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(outcome.new_status, ViajeStatus::Cancelled);

    // El progreso queda congelado en el estado previo a la cancelación
    let stored = store.load_viaje(viaje.id).await.unwrap().unwrap();
    assert_eq!(stored.cancelled_from, Some(ViajeStatus::DriverConfirmed));
    let registry = LifecycleRegistry::standard();
    assert_eq!(
        registry.progress_of_viaje(stored.status, stored.cancelled_from),
        registry.progress_of(ViajeStatus::DriverConfirmed)
    );
}

#[tokio::test]
async fn test_driver_cannot_complete() {
    let (_store, service, _despacho, viaje) = setup(ViajeStatus::ArrivedOrigin).await;

    let err = service
        .apply_transition(
            viaje.id,
            ViajeStatus::Completed,
            &caller(UserRole::Driver),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn test_terminal_viaje_rejects_everything() {
    let (_store, service, _despacho, viaje) = setup(ViajeStatus::Completed).await;

    let err = service
        .apply_transition(
            viaje.id,
            ViajeStatus::Cancelled,
            &caller(UserRole::Admin),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_unknown_viaje_is_not_found() {
    let (_store, service, _despacho, _viaje) = setup(ViajeStatus::Pending).await;

    let err = service
        .apply_transition(
            Uuid::new_v4(),
            ViajeStatus::CarrierAssigned,
            &caller(UserRole::Admin),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_requesting_current_state_is_invalid() {
    let (_store, service, _despacho, viaje) = setup(ViajeStatus::Loading).await;

    let err = service
        .apply_transition(
            viaje.id,
            ViajeStatus::Loading,
            &caller(UserRole::Admin),
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_full_chain_leaves_contiguous_audit_trail() {
    let (store, service, despacho, viaje) = setup(ViajeStatus::Pending).await;
    let admin = caller(UserRole::Admin);
    let registry = LifecycleRegistry::standard();

    // Recorrer la cadena completa pending -> completed: 17 estados, 16 aristas
    let mut current = ViajeStatus::Pending;
    let mut steps = 0;
    while current != ViajeStatus::Completed {
        let next = registry
            .legal_next_states(current)
            .into_iter()
            .find(|s| *s != ViajeStatus::Cancelled)
            .unwrap();
        let outcome = service
            .apply_transition(viaje.id, next, &admin, None)
            .await
            .unwrap();
        assert_eq!(outcome.previous_status, current);
        current = next;
        steps += 1;
    }
    assert_eq!(steps, 16);

    // El historial encadena de forma contigua desde pending hasta completed
    let trail: Vec<ViajeTransition> = store.list_transitions(viaje.id).await.unwrap();
    assert_eq!(trail.len(), 16);
    assert_eq!(trail.first().unwrap().from_status, ViajeStatus::Pending);
    assert_eq!(trail.last().unwrap().to_status, ViajeStatus::Completed);
    for pair in trail.windows(2) {
        assert_eq!(pair[0].to_status, pair[1].from_status);
    }

    // Con su único viaje completado, el despacho queda completado
    assert_eq!(
        store.despacho(despacho.id).await.unwrap().status,
        DespachoStatus::Completed
    );
}

#[tokio::test]
async fn test_despacho_projection_with_multiple_viajes() {
    let store = Arc::new(MemoryStore::new());
    let despacho = make_despacho();
    let viaje_a = make_viaje(&despacho, 1, ViajeStatus::DepartedDestination);
    let viaje_b = make_viaje(&despacho, 2, ViajeStatus::Pending);
    store.insert_despacho(despacho.clone()).await;
    store.insert_viaje(viaje_a.clone()).await;
    store.insert_viaje(viaje_b.clone()).await;

    let service = ViajeStateService::new(
        store.clone() as Arc<dyn ViajeStore>,
        Arc::new(CountingNotifier::default()),
        LifecycleRegistry::standard(),
    );

    // Completar el primer viaje: el segundo sigue pendiente, el despacho
    // sigue en proceso
    service
        .apply_transition(
            viaje_a.id,
            ViajeStatus::Completed,
            &caller(UserRole::Supervisor),
            None,
        )
        .await
        .unwrap();
    assert_eq!(
        store.despacho(despacho.id).await.unwrap().status,
        DespachoStatus::InProgress
    );

    // Cancelar el segundo: todos terminales con uno completado => completado
    service
        .apply_transition(
            viaje_b.id,
            ViajeStatus::Cancelled,
            &caller(UserRole::Dispatcher),
            None,
        )
        .await
        .unwrap();
    assert_eq!(
        store.despacho(despacho.id).await.unwrap().status,
        DespachoStatus::Completed
    );
}

#[tokio::test]
async fn test_notification_failure_does_not_affect_transition() {
    let store = Arc::new(MemoryStore::new());
    let despacho = make_despacho();
    let viaje = make_viaje(&despacho, 1, ViajeStatus::Pending);
    store.insert_despacho(despacho.clone()).await;
    store.insert_viaje(viaje.clone()).await;

    let service = ViajeStateService::new(
        store.clone() as Arc<dyn ViajeStore>,
        Arc::new(FailingNotifier),
        LifecycleRegistry::standard(),
    );

    let outcome = service
        .apply_transition(
            viaje.id,
            ViajeStatus::CarrierAssigned,
            &caller(UserRole::Dispatcher),
            None,
        )
        .await
        .unwrap();

    assert_eq!(outcome.new_status, ViajeStatus::CarrierAssigned);
    let stored = store.load_viaje(viaje.id).await.unwrap().unwrap();
    assert_eq!(stored.status, ViajeStatus::CarrierAssigned);
}

/// Store que sincroniza las lecturas de dos requests concurrentes para
/// garantizar que ambas lean el mismo estado antes de que alguna confirme.
struct BarrierStore {
    inner: Arc<MemoryStore>,
    barrier: Barrier,
}

#[async_trait]
impl ViajeStore for BarrierStore {
    async fn load_viaje(&self, id: Uuid) -> Result<Option<Viaje>, AppError> {
        let viaje = self.inner.load_viaje(id).await?;
        self.barrier.wait().await;
        Ok(viaje)
    }

    async fn commit_transition(
        &self,
        commit: TransitionCommit,
    ) -> Result<DespachoStatus, AppError> {
        self.inner.commit_transition(commit).await
    }

    async fn list_transitions(&self, viaje_id: Uuid) -> Result<Vec<ViajeTransition>, AppError> {
        self.inner.list_transitions(viaje_id).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_transitions_have_exactly_one_winner() {
    let inner = Arc::new(MemoryStore::new());
    let despacho = make_despacho();
    let viaje = make_viaje(&despacho, 1, ViajeStatus::Loading);
    inner.insert_despacho(despacho.clone()).await;
    inner.insert_viaje(viaje.clone()).await;

    let store = Arc::new(BarrierStore {
        inner: inner.clone(),
        barrier: Barrier::new(2),
    });
    let service = ViajeStateService::new(
        store as Arc<dyn ViajeStore>,
        Arc::new(CountingNotifier::default()),
        LifecycleRegistry::standard(),
    );

    let service_a = service.clone();
    let service_b = service.clone();
    let viaje_id = viaje.id;

    let task_a = tokio::spawn(async move {
        service_a
            .apply_transition(
                viaje_id,
                ViajeStatus::Loaded,
                &caller(UserRole::AccessControl),
                None,
            )
            .await
    });
    let task_b = tokio::spawn(async move {
        service_b
            .apply_transition(
                viaje_id,
                ViajeStatus::Loaded,
                &caller(UserRole::Supervisor),
                None,
            )
            .await
    });

    let result_a = task_a.await.unwrap();
    let result_b = task_b.await.unwrap();

    let winners = [&result_a, &result_b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactamente una transición debe ganar");

    let loser = if result_a.is_err() { result_a } else { result_b };
    assert!(matches!(
        loser.unwrap_err(),
        AppError::ConcurrentModification(_)
    ));

    // El estado quedó en loaded y hay UN solo registro de auditoría
    let stored = inner.load_viaje(viaje_id).await.unwrap().unwrap();
    assert_eq!(stored.status, ViajeStatus::Loaded);
    assert_eq!(inner.list_transitions(viaje_id).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_sibling_completions_leave_despacho_synced() {
    // Dos transiciones concurrentes sobre viajes DISTINTOS del mismo
    // despacho: ambas ganan su propio CAS, y la proyección final tiene que
    // reflejar los dos avances, no la foto que cada una leyó antes del commit.
    let inner = Arc::new(MemoryStore::new());
    let despacho = make_despacho();
    let viaje_a = make_viaje(&despacho, 1, ViajeStatus::DepartedDestination);
    let viaje_b = make_viaje(&despacho, 2, ViajeStatus::DepartedDestination);
    inner.insert_despacho(despacho.clone()).await;
    inner.insert_viaje(viaje_a.clone()).await;
    inner.insert_viaje(viaje_b.clone()).await;

    let store = Arc::new(BarrierStore {
        inner: inner.clone(),
        barrier: Barrier::new(2),
    });
    let service = ViajeStateService::new(
        store as Arc<dyn ViajeStore>,
        Arc::new(CountingNotifier::default()),
        LifecycleRegistry::standard(),
    );

    let service_a = service.clone();
    let service_b = service.clone();
    let id_a = viaje_a.id;
    let id_b = viaje_b.id;

    let task_a = tokio::spawn(async move {
        service_a
            .apply_transition(id_a, ViajeStatus::Completed, &caller(UserRole::Supervisor), None)
            .await
    });
    let task_b = tokio::spawn(async move {
        service_b
            .apply_transition(id_b, ViajeStatus::Completed, &caller(UserRole::Supervisor), None)
            .await
    });

    // Viajes distintos: las dos transiciones deben ganar
    task_a.await.unwrap().unwrap();
    task_b.await.unwrap().unwrap();

    assert_eq!(
        inner.load_viaje(id_a).await.unwrap().unwrap().status,
        ViajeStatus::Completed
    );
    assert_eq!(
        inner.load_viaje(id_b).await.unwrap().unwrap().status,
        ViajeStatus::Completed
    );
    assert_eq!(
        inner.despacho(despacho.id).await.unwrap().status,
        DespachoStatus::Completed
    );
}

#[tokio::test]
async fn test_notifier_is_invoked_after_commit() {
    let store = Arc::new(MemoryStore::new());
    let despacho = make_despacho();
    let viaje = make_viaje(&despacho, 1, ViajeStatus::Pending);
    store.insert_despacho(despacho.clone()).await;
    store.insert_viaje(viaje.clone()).await;

    let notifier = Arc::new(CountingNotifier::default());
    let service = ViajeStateService::new(
        store.clone() as Arc<dyn ViajeStore>,
        notifier.clone() as Arc<dyn Notifier>,
        LifecycleRegistry::standard(),
    );

    service
        .apply_transition(
            viaje.id,
            ViajeStatus::CarrierAssigned,
            &caller(UserRole::Dispatcher),
            None,
        )
        .await
        .unwrap();

    // La notificación corre en una tarea desacoplada; dar lugar a que corra
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(
        notifier
            .delivered
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}
