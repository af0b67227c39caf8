//! End-to-end wizard flows over an in-memory snapshot store and a stub
//! gateway: create and edit paths, gating, failure handling, and recovery.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;

use souk_core::gateway::{SubmissionGateway, SubmitEnvelope};
use souk_core::models::{AdType, PaymentMode, PendingImage, PublishedAd, VariantDetails};
use souk_core::SubmissionPayload;
use souk_store::{DraftStore, MemorySnapshotStore, RecoveryAdapter, SnapshotStore};
use souk_wizard::{
    Advance, BillingInput, GeneralInfoInput, OfferInput, ProductInput, SubmitOutcome, Wizard,
    WizardStage,
};

const SNAPSHOT_KEY: &str = "ad-draft";

/// Gateway stub that records payloads and replies with a queued envelope.
#[derive(Default)]
struct StubGateway {
    reply: Mutex<Option<SubmitEnvelope>>,
    sent: Mutex<Vec<SubmissionPayload>>,
}

impl StubGateway {
    fn replying(envelope: SubmitEnvelope) -> Arc<Self> {
        Arc::new(StubGateway {
            reply: Mutex::new(Some(envelope)),
            sent: Mutex::new(Vec::new()),
        })
    }

    fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    fn last_payload(&self) -> SubmissionPayload {
        self.sent.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl SubmissionGateway for StubGateway {
    async fn submit(&self, payload: SubmissionPayload) -> anyhow::Result<SubmitEnvelope> {
        self.sent.lock().unwrap().push(payload);
        Ok(self
            .reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| SubmitEnvelope::ok(None)))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

fn image(name: &str) -> PendingImage {
    PendingImage::new(name, "image/jpeg", Bytes::from_static(&[0xFF, 0xD8]))
}

async fn wizard_with(
    gateway: Arc<StubGateway>,
) -> (Wizard, Arc<MemorySnapshotStore>) {
    init_tracing();
    let snapshot = Arc::new(MemorySnapshotStore::new());
    let store = DraftStore::new(snapshot.clone(), SNAPSHOT_KEY);
    (Wizard::new(store, gateway), snapshot)
}

/// Walk a product draft up to the point where submit is allowed.
async fn compose_product(wizard: &mut Wizard) {
    wizard.select_type(AdType::Product).await.unwrap();

    wizard
        .apply(
            GeneralInfoInput {
                title: Some("Chair".to_string()),
                description: Some("Wooden chair".to_string()),
                location_same_as_profile: Some(true),
                ..Default::default()
            }
            .into_patch(),
        )
        .await
        .unwrap();
    assert!(wizard.store_mut().push_image(image("chair.jpg")).await);
    assert_eq!(
        wizard.advance_from_general().unwrap(),
        Advance::Moved(WizardStage::GeneralInfoComplete)
    );

    wizard
        .apply(
            ProductInput {
                category: "home".to_string(),
                sub_category: "furniture".to_string(),
                asking_price: Some(25.0),
                ..Default::default()
            }
            .into_patch(),
        )
        .await
        .unwrap();
    assert_eq!(
        wizard.advance_from_variant().unwrap(),
        Advance::Moved(WizardStage::VariantInfoComplete)
    );

    wizard
        .apply(
            BillingInput {
                payment_mode: Some(PaymentMode::Monthly),
            }
            .into_patch(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn product_happy_path_submits_and_resets() {
    let gateway = StubGateway::replying(SubmitEnvelope::ok(Some(serde_json::json!({"id": 7}))));
    let (mut wizard, snapshot) = wizard_with(gateway.clone()).await;

    compose_product(&mut wizard).await;
    assert!(snapshot.contains(SNAPSHOT_KEY));

    match wizard.submit().await.unwrap() {
        SubmitOutcome::Accepted { data } => assert_eq!(data.unwrap()["id"], 7),
        other => panic!("unexpected outcome: {:?}", other),
    }

    // Payload sanity: product fields present, no quantity for a one-off ad.
    let payload = gateway.last_payload();
    assert_eq!(payload.field("adType"), Some("product"));
    assert_eq!(payload.field("askingPrice"), Some("25"));
    assert!(!payload.has_field("quantity"));
    assert_eq!(payload.files.len(), 1);

    // Success destroys the draft and its snapshot.
    assert_eq!(wizard.stage(), WizardStage::Submitted);
    assert!(wizard.draft().is_blank());
    assert!(!snapshot.contains(SNAPSHOT_KEY));

    wizard.acknowledge_submitted().unwrap();
    assert_eq!(wizard.stage(), WizardStage::Blank);
}

#[tokio::test]
async fn strict_step_ordering_is_enforced() {
    let (mut wizard, _) = wizard_with(StubGateway::replying(SubmitEnvelope::ok(None))).await;

    // No path from Blank past the general-info step.
    assert!(wizard.advance_from_general().is_err());
    assert!(wizard.advance_from_variant().is_err());
    assert!(wizard.submit().await.is_err());

    wizard.select_type(AdType::Product).await.unwrap();
    assert!(wizard.advance_from_variant().is_err());

    // Gated advance: incomplete general info blocks with the first unmet field.
    match wizard.advance_from_general().unwrap() {
        Advance::Blocked(err) => assert_eq!(err.field, "title"),
        other => panic!("unexpected advance: {:?}", other),
    }
    assert_eq!(wizard.stage(), WizardStage::TypeSelected);
}

#[tokio::test]
async fn rejection_preserves_draft_for_retry() {
    let gateway = StubGateway::replying(SubmitEnvelope::rejected(
        "Validation failed: askingPrice out of range",
    ));
    let (mut wizard, snapshot) = wizard_with(gateway.clone()).await;

    compose_product(&mut wizard).await;
    match wizard.submit().await.unwrap() {
        SubmitOutcome::Rejected {
            message,
            back_to_variant_step,
        } => {
            assert!(message.contains("askingPrice"));
            assert!(back_to_variant_step);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    // Draft and snapshot intact, message surfaced, wizard back in flow.
    assert_eq!(wizard.stage(), WizardStage::Failed);
    assert!(!wizard.draft().is_blank());
    assert!(snapshot.contains(SNAPSHOT_KEY));
    assert!(wizard
        .store()
        .error_message()
        .unwrap()
        .contains("Validation failed"));

    wizard.acknowledge_failure().unwrap();
    assert_eq!(wizard.stage(), WizardStage::VariantInfoComplete);

    // Correct and resubmit through the same gateway, now accepting.
    *gateway.reply.lock().unwrap() = Some(SubmitEnvelope::ok(None));
    match wizard.submit().await.unwrap() {
        SubmitOutcome::Accepted { .. } => {}
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(gateway.sent_count(), 2);
}

#[tokio::test]
async fn backward_navigation_invalidates_submit() {
    let (mut wizard, _) = wizard_with(StubGateway::replying(SubmitEnvelope::ok(None))).await;
    compose_product(&mut wizard).await;

    // Go back and blank the title; the billing step re-validates everything.
    assert!(wizard.go_back());
    assert!(wizard.go_back());
    wizard
        .apply(
            GeneralInfoInput {
                title: Some(String::new()),
                ..Default::default()
            }
            .into_patch(),
        )
        .await
        .unwrap();
    match wizard.advance_from_general().unwrap() {
        Advance::Blocked(err) => assert_eq!(err.field, "title"),
        other => panic!("unexpected advance: {:?}", other),
    }
}

#[tokio::test]
async fn blocked_submit_falls_back_to_the_owning_step() {
    let (mut wizard, _) = wizard_with(StubGateway::replying(SubmitEnvelope::ok(None))).await;
    compose_product(&mut wizard).await;

    // Blank the title after the gates have passed; submit re-validates and
    // regresses straight to the stage that owns the unmet field, skipping
    // the intermediate one.
    wizard
        .apply(
            GeneralInfoInput {
                title: Some(String::new()),
                ..Default::default()
            }
            .into_patch(),
        )
        .await
        .unwrap();
    match wizard.submit().await.unwrap() {
        SubmitOutcome::Blocked(err) => assert_eq!(err.field, "title"),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(wizard.stage(), WizardStage::TypeSelected);
    assert!(wizard.stage().can_transition(WizardStage::GeneralInfoComplete));
}

#[tokio::test]
async fn switching_type_resets_variant_data_and_stage() {
    let (mut wizard, _) = wizard_with(StubGateway::replying(SubmitEnvelope::ok(None))).await;
    compose_product(&mut wizard).await;
    assert_eq!(wizard.stage(), WizardStage::VariantInfoComplete);

    wizard.select_type(AdType::Offer).await.unwrap();
    assert_eq!(wizard.stage(), WizardStage::TypeSelected);
    match wizard.draft().details.as_ref().unwrap() {
        VariantDetails::Offer(o) => assert!(o.category.is_empty()),
        other => panic!("unexpected details: {:?}", other),
    }

    // Mismatched variant patches are refused.
    let err = wizard
        .apply(
            ProductInput {
                category: "home".to_string(),
                ..Default::default()
            }
            .into_patch(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, souk_core::AppError::InvalidInput(_)));
}

#[tokio::test]
async fn offer_flow_encodes_the_discount_branch() {
    let gateway = StubGateway::replying(SubmitEnvelope::ok(None));
    let (mut wizard, _) = wizard_with(gateway.clone()).await;

    wizard.select_type(AdType::Offer).await.unwrap();
    wizard
        .apply(
            GeneralInfoInput {
                title: Some("Lunch deal".to_string()),
                description: Some("Two for one".to_string()),
                location_same_as_profile: Some(true),
                ..Default::default()
            }
            .into_patch(),
        )
        .await
        .unwrap();
    assert!(wizard.store_mut().push_image(image("lunch.jpg")).await);
    wizard.advance_from_general().unwrap();

    wizard
        .apply(
            OfferInput {
                expiry_date: NaiveDate::from_ymd_opt(2030, 6, 1),
                category: "food".to_string(),
                full_price: Some(80.0),
                discount_deal: true,
                discount_percent: Some(20.0),
                offer_detail: String::new(),
            }
            .into_patch(),
        )
        .await
        .unwrap();
    wizard.advance_from_variant().unwrap();

    match wizard.submit().await.unwrap() {
        SubmitOutcome::Accepted { .. } => {}
        other => panic!("unexpected outcome: {:?}", other),
    }

    let payload = gateway.last_payload();
    assert_eq!(payload.field("adType"), Some("offer"));
    assert_eq!(payload.field("discountDeal"), Some("true"));
    assert_eq!(payload.field("discountPercent"), Some("20"));
    assert!(!payload.has_field("offerDetail"));
}

#[tokio::test]
async fn edit_flow_sends_image_diff() {
    let gateway = StubGateway::replying(SubmitEnvelope::ok(None));
    init_tracing();

    let ad = PublishedAd {
        id: uuid::Uuid::new_v4(),
        title: "Chair".to_string(),
        description: "Wooden chair".to_string(),
        image_urls: vec!["0.jpg".into(), "1.jpg".into(), "2.jpg".into()],
        location_same_as_profile: true,
        city: String::new(),
        neighbourhood: String::new(),
        phone: String::new(),
        show_phone: false,
        payment_mode: PaymentMode::Monthly,
        details: VariantDetails::Product(souk_core::ProductDetails {
            category: "home".to_string(),
            sub_category: "furniture".to_string(),
            asking_price: Some(25.0),
            ..Default::default()
        }),
    };

    let snapshot = Arc::new(MemorySnapshotStore::new());
    let mut store = DraftStore::new(snapshot.clone(), SNAPSHOT_KEY);
    store.seed_from(&ad).await;
    store.remove_existing_image(1).await;
    store.push_new_image(image("new.jpg")).await;

    // A seeded, complete draft resumes directly at the billing gate.
    let mut wizard = Wizard::new(store, gateway.clone());
    assert_eq!(wizard.stage(), WizardStage::VariantInfoComplete);

    match wizard.submit().await.unwrap() {
        SubmitOutcome::Accepted { .. } => {}
        other => panic!("unexpected outcome: {:?}", other),
    }

    let payload = gateway.last_payload();
    assert!(matches!(
        payload.target,
        souk_core::SubmissionTarget::Update(id) if id == ad.id
    ));
    assert_eq!(payload.field("removedImages"), Some("[1]"));
    assert_eq!(payload.files.len(), 1);
    assert_eq!(payload.files[0].file_name, "new.jpg");
}

#[tokio::test]
async fn recovery_resumes_where_the_draft_left_off() {
    let gateway = StubGateway::replying(SubmitEnvelope::ok(None));
    init_tracing();
    let snapshot = Arc::new(MemorySnapshotStore::new());

    // First session: partial general info, then the user navigates away.
    {
        let store = DraftStore::new(snapshot.clone(), SNAPSHOT_KEY);
        let mut wizard = Wizard::new(store, gateway.clone());
        wizard.select_type(AdType::Product).await.unwrap();
        wizard
            .apply(
                GeneralInfoInput {
                    title: Some("Chair".to_string()),
                    ..Default::default()
                }
                .into_patch(),
            )
            .await
            .unwrap();
    }

    // Second session: recover from the snapshot. The in-flight edit wins
    // over a fresh server copy.
    let adapter = RecoveryAdapter::new(snapshot.clone(), SNAPSHOT_KEY);
    let recovered = adapter.recover(None, None).await;
    assert_eq!(recovered.title, "Chair");
    assert_eq!(recovered.ad_type(), Some(AdType::Product));

    let mut store = DraftStore::new(snapshot.clone(), SNAPSHOT_KEY);
    store.install(recovered).await;
    let wizard = Wizard::new(store, gateway);
    // Images were blobs and did not survive; the wizard reopens on the
    // general-info step, not deeper.
    assert_eq!(wizard.stage(), WizardStage::TypeSelected);
}

#[tokio::test]
async fn snapshot_round_trip_preserves_everything_but_blobs() {
    init_tracing();
    let snapshot = Arc::new(MemorySnapshotStore::new());
    let mut store = DraftStore::new(snapshot.clone(), SNAPSHOT_KEY);

    store.select_type(AdType::Product).await;
    store
        .update(souk_store::DraftPatch {
            title: Some("Chair".to_string()),
            description: Some("Wooden chair".to_string()),
            ..Default::default()
        })
        .await;
    store.push_image(image("chair.jpg")).await;

    let reloaded = snapshot.load(SNAPSHOT_KEY).await.unwrap().unwrap();
    let mut expected = store.draft().clone();
    expected.images.clear();
    assert_eq!(reloaded, expected);
}
