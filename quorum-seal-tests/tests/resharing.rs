use quorum_seal::types::{
    operations::{
        reissue_room::{CreateReissueRoomRequest, ReissueStatus, SubmitReissueShareRequest},
        signing_room::{FinishSigningRequest, SignDocumentRequest, SigningStatus},
        verify::VerifyDocumentRequest,
    },
    ShareFile,
};
use quorum_seal_server::QuorumSealServerError;
use quorum_seal_tests::{create_and_download, formula, open_signing_room, service, threshold};

#[tokio::test]
async fn reissued_shares_sign_for_the_same_key() {
    let service = service();
    let names = ["Alice", "Bob", "Carol"];
    let (created, old) = create_and_download(&service, threshold(2, &names), &names).await;

    let reissue = service
        .create_reissue_room(CreateReissueRoomRequest {
            share: old[0].clone(),
            new_formula: formula("T1(T2(Dave,Erin),Frank)"),
        })
        .await
        .unwrap();
    assert_eq!(reissue.status, ReissueStatus::InsufficientShares);

    let response = service
        .submit_reissue_share(
            &reissue.room_id,
            SubmitReissueShareRequest {
                share: old[2].clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status, ReissueStatus::Reissued);

    let room = service.get_reissue_room(&reissue.room_id).await.unwrap();
    assert_eq!(room.new_formula, "T1(T2(Dave,Erin),Frank)");
    assert_eq!(room.new_participants_count, 3);

    let mut new = Vec::new();
    for name in ["Dave", "Erin", "Frank"] {
        let bytes = service
            .download_reissued_share(&reissue.room_id, name)
            .await
            .unwrap();
        new.push(ShareFile::from_json_bytes(&bytes).unwrap());
    }
    assert!(new.iter().all(|share| share.public_key == created.public_key));

    // Frank alone satisfies the new formula.
    let signing = open_signing_room(&service, &new[2]).await;
    let response = service
        .finish_signing(
            &signing.room_id,
            FinishSigningRequest {
                creator_token: signing.creator_token.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status, SigningStatus::Signed);

    let signed = service
        .download_signed_document(&signing.room_id)
        .await
        .unwrap();
    let verified = service
        .verify_document(VerifyDocumentRequest {
            pdf_binary: signed.pdf_binary,
            public_key: created.public_key,
        })
        .await;
    assert!(verified.valid);
}

#[tokio::test]
async fn old_and_new_shares_do_not_mix() {
    let service = service();
    let names = ["Alice", "Bob", "Carol"];
    let (_, old) = create_and_download(&service, threshold(2, &names), &names).await;

    let reissue = service
        .create_reissue_room(CreateReissueRoomRequest {
            share: old[0].clone(),
            new_formula: threshold(2, &["Dave", "Erin", "Frank"]),
        })
        .await
        .unwrap();
    let _ = service
        .submit_reissue_share(
            &reissue.room_id,
            SubmitReissueShareRequest {
                share: old[1].clone(),
            },
        )
        .await
        .unwrap();
    let dave = service
        .download_reissued_share(&reissue.room_id, "Dave")
        .await
        .unwrap();
    let dave = ShareFile::from_json_bytes(&dave).unwrap();

    let signing = open_signing_room(&service, &old[2]).await;
    let error = service
        .sign_document(&signing.room_id, SignDocumentRequest { share: dave })
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        QuorumSealServerError::ShareMismatch("formula")
    ));
}

#[tokio::test]
async fn invalid_new_formula_is_rejected() {
    let service = service();
    let names = ["Alice", "Bob"];
    let (_, old) = create_and_download(&service, threshold(1, &names), &names).await;

    let error = service
        .create_reissue_room(CreateReissueRoomRequest {
            share: old[0].clone(),
            new_formula: formula("T3(Dave,Erin)"),
        })
        .await
        .unwrap_err();
    assert_eq!(
        error.client_error().kind,
        quorum_seal_server::ClientErrorKind::InvalidArgument
    );
}
