//! Validator votes on outbound requests, single and batched.

mod common;

use cosmwasm_std::{from_json, Addr};

use common::*;
use quorum_relay::msg::{BatchValidateResponse, ExecuteMsg, QueryMsg, RequestResponse};
use quorum_relay::state::RequestStatus;
use quorum_relay::ContractError;

fn status(suite: &Suite, request_id: u64) -> RequestStatus {
    let res: RequestResponse = suite.query(&QueryMsg::Request { request_id });
    res.status
}

fn batch(
    suite: &mut Suite,
    validator: &Addr,
    request_ids: Vec<u64>,
) -> anyhow::Result<cw_multi_test::AppResponse> {
    suite.execute(validator, &ExecuteMsg::BatchValidate { request_ids })
}

#[test]
fn test_quorum_reached_on_second_vote() {
    let mut suite = setup();
    suite.bridge(1000).unwrap();
    let (val1, val2) = (suite.validators[0].clone(), suite.validators[1].clone());

    let res = suite.validate(&val1, 0).unwrap();
    assert_eq!(attr(&res, "votes"), Some("1".to_string()));
    assert_eq!(attr(&res, "status"), Some("pending".to_string()));
    assert_eq!(status(&suite, 0), RequestStatus::Pending);

    let res = suite.validate(&val2, 0).unwrap();
    assert_eq!(attr(&res, "votes"), Some("2".to_string()));
    assert_eq!(attr(&res, "status"), Some("validated".to_string()));

    let request: RequestResponse = suite.query(&QueryMsg::Request { request_id: 0 });
    assert_eq!(request.status, RequestStatus::Validated);
    assert_eq!(request.voted_validators, vec![val1, val2]);
}

#[test]
fn test_vote_rejections() {
    let mut suite = setup_with_threshold(3);
    suite.bridge(1000).unwrap();
    let val1 = suite.validators[0].clone();

    let user = suite.user.clone();
    let res = suite.validate(&user, 0);
    assert_error(
        res,
        ContractError::NotAnActiveValidator {
            address: user.to_string(),
        },
    );

    let res = suite.validate(&val1, 9);
    assert_error(res, ContractError::RequestNotFound { request_id: 9 });

    suite.validate(&val1, 0).unwrap();
    let res = suite.validate(&val1, 0);
    assert_error(res, ContractError::AlreadyValidated { request_id: 0 });

    let request: RequestResponse = suite.query(&QueryMsg::Request { request_id: 0 });
    assert_eq!(request.voted_validators.len(), 1);
}

#[test]
fn test_votes_after_quorum_rejected() {
    let mut suite = setup();
    suite.bridge(1000).unwrap();
    let validators = suite.validators.clone();

    suite.validate(&validators[0], 0).unwrap();
    suite.validate(&validators[1], 0).unwrap();

    let res = suite.validate(&validators[2], 0);
    assert_error(res, ContractError::AlreadyValidated { request_id: 0 });
}

#[test]
fn test_refunded_request_cannot_be_voted() {
    let mut suite = setup();
    suite.bridge(1000).unwrap();
    suite.advance(604_800);
    let user = suite.user.clone();
    suite.refund(&user, 0).unwrap();

    let val1 = suite.validators[0].clone();
    let res = suite.validate(&val1, 0);
    assert_error(res, ContractError::AlreadyRefunded { request_id: 0 });
}

#[test]
fn test_threshold_change_applies_to_later_votes() {
    let mut suite = setup_with_threshold(3);
    suite.bridge(1000).unwrap();
    let validators = suite.validators.clone();
    let admin = suite.admin.clone();

    suite.validate(&validators[0], 0).unwrap();
    suite
        .execute(&admin, &ExecuteMsg::SetRequiredValidations { required: 2 })
        .unwrap();

    // The existing vote counts toward the lowered threshold
    let res = suite.validate(&validators[1], 0).unwrap();
    assert_eq!(attr(&res, "status"), Some("validated".to_string()));
}

#[test]
fn test_batch_validate_mixed_results() {
    let mut suite = setup();
    suite.bridge(1000).unwrap();
    suite.bridge(1000).unwrap();
    suite.bridge(1000).unwrap();
    let (val1, val2) = (suite.validators[0].clone(), suite.validators[1].clone());

    suite.validate(&val1, 1).unwrap();

    let res = batch(&mut suite, &val1, vec![0, 1, 2, 0, 99]).unwrap();
    assert_eq!(attr(&res, "accepted"), Some("0,2".to_string()));
    assert_eq!(attr(&res, "rejected"), Some("1,0,99".to_string()));
    assert_eq!(attr(&res, "validated"), None);
    assert_eq!(
        attr(&res, "rejected_99"),
        Some(ContractError::RequestNotFound { request_id: 99 }.to_string())
    );

    let data: BatchValidateResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(data.accepted, vec![0, 2]);
    assert!(data.validated.is_empty());
    let reasons: Vec<(u64, String)> = data
        .rejected
        .into_iter()
        .map(|r| (r.request_id, r.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (1, ContractError::AlreadyValidated { request_id: 1 }.to_string()),
            (0, ContractError::DuplicateValidatorVote { request_id: 0 }.to_string()),
            (99, ContractError::RequestNotFound { request_id: 99 }.to_string()),
        ]
    );

    // A second validator completes all three
    let res = batch(&mut suite, &val2, vec![0, 1, 2]).unwrap();
    let data: BatchValidateResponse = from_json(res.data.unwrap()).unwrap();
    assert_eq!(data.validated, vec![0, 1, 2]);
    for id in 0..3 {
        assert_eq!(status(&suite, id), RequestStatus::Validated);
    }
}

#[test]
fn test_batch_validate_bounds() {
    let mut suite = setup();
    let val1 = suite.validators[0].clone();

    let res = batch(&mut suite, &val1, vec![]);
    assert_error(
        res,
        ContractError::InvalidBatch {
            reason: "Batch cannot be empty".to_string(),
        },
    );

    let res = batch(&mut suite, &val1, (0..51).collect());
    assert_error(
        res,
        ContractError::InvalidBatch {
            reason: "Batch of 51 exceeds max 50".to_string(),
        },
    );

    let user = suite.user.clone();
    let res = batch(&mut suite, &user, vec![0]);
    assert_error(
        res,
        ContractError::NotAnActiveValidator {
            address: user.to_string(),
        },
    );
}

#[test]
fn test_batch_of_only_failures_still_succeeds() {
    let mut suite = setup();
    let val1 = suite.validators[0].clone();

    let res = batch(&mut suite, &val1, vec![5, 6]).unwrap();
    assert_eq!(attr(&res, "accepted_count"), Some("0".to_string()));
    assert_eq!(attr(&res, "rejected_count"), Some("2".to_string()));
    assert_eq!(attr(&res, "accepted"), None);
}
