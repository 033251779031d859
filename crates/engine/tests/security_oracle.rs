use alloy_primitives::{Address, Selector};
use secoracle_engine::{OracleError, ResolutionSource, Role, SecurityOracle};

const ADMIN: Address = Address::new([0xa0; 20]);
const EDITOR: Address = Address::new([0xe1; 20]);
const READER: Address = Address::new([0x2e; 20]);

fn contract() -> Address {
    "0xc06Ca4a7DaEB0D1601Bb47297d9Fd170f231D872"
        .parse()
        .expect("valid contract address")
}

fn selector(hex: &str) -> Selector {
    hex.parse().expect("valid selector")
}

fn deploy() -> SecurityOracle {
    SecurityOracle::new(ADMIN, None).expect("non-zero admin")
}

mod lookups {
    use super::*;

    #[test]
    fn address_only_lookup_succeeds() {
        let oracle = deploy();
        assert_eq!(oracle.get_security_score(contract()), Ok(0));
    }

    #[test]
    fn zero_address_lookup_is_rejected() {
        let oracle = deploy();
        assert_eq!(
            oracle.get_security_score(Address::ZERO),
            Err(OracleError::InvalidTarget)
        );
    }

    #[test]
    fn address_and_selector_lookup_succeeds() {
        let oracle = deploy();
        assert_eq!(
            oracle.get_security_score_bytes4(contract(), selector("0x00000001")),
            Ok(0)
        );
    }

    #[test]
    fn zero_selector_lookup_is_rejected() {
        let oracle = deploy();
        assert_eq!(
            oracle.get_security_score_bytes4(contract(), selector("0x00000000")),
            Err(OracleError::InvalidSelector)
        );
    }

    #[test]
    fn zero_selector_wins_over_zero_target() {
        let oracle = deploy();
        assert_eq!(
            oracle.get_security_score_bytes4(Address::ZERO, Selector::ZERO),
            Err(OracleError::InvalidSelector)
        );
        assert_eq!(
            oracle.get_security_score_bytes4(Address::ZERO, selector("0x00000001")),
            Err(OracleError::InvalidTarget)
        );
    }

    #[test]
    fn unscored_targets_resolve_to_current_default() {
        let mut oracle = SecurityOracle::new(ADMIN, Some(25)).unwrap();
        let targets = [contract(), EDITOR, READER, Address::new([0x01; 20])];

        for target in targets {
            assert_eq!(oracle.get_security_score(target), Ok(25));
            assert_eq!(
                oracle.get_security_score_bytes4(target, selector("0xdeadbeef")),
                Ok(25)
            );
        }

        oracle.update_default_score(ADMIN, 60).unwrap();
        for target in targets {
            assert_eq!(oracle.get_security_score(target), Ok(60));
        }
    }

    #[test]
    fn selector_entries_do_not_leak_into_address_lookups() {
        let mut oracle = SecurityOracle::new(ADMIN, Some(50)).unwrap();
        oracle
            .push_result(ADMIN, contract(), Some(selector("0x00000001")), 10, 10)
            .unwrap();

        assert_eq!(
            oracle.get_security_score_bytes4(contract(), selector("0x00000001")),
            Ok(10)
        );
        assert_eq!(oracle.get_security_score(contract()), Ok(50));
        assert_eq!(
            oracle.get_security_score_bytes4(contract(), selector("0x00000002")),
            Ok(50)
        );

        oracle.push_result(ADMIN, contract(), None, 30, 10).unwrap();
        assert_eq!(oracle.get_security_score(contract()), Ok(30));
        assert_eq!(
            oracle.get_security_score_bytes4(contract(), selector("0x00000002")),
            Ok(30)
        );
        assert_eq!(
            oracle.get_security_score_bytes4(contract(), selector("0x00000001")),
            Ok(10)
        );
    }

    #[test]
    fn pushed_score_is_returned_regardless_of_default() {
        for default in [0u8, 1, 99, 255] {
            let mut oracle = SecurityOracle::new(ADMIN, Some(default)).unwrap();
            oracle
                .push_result(ADMIN, contract(), Some(selector("0xa9059cbb")), 42, 7)
                .unwrap();

            let resolution = oracle
                .resolve_security_score(contract(), Some(selector("0xa9059cbb")))
                .unwrap();
            assert_eq!(resolution.score, 42);
            assert_eq!(resolution.source, ResolutionSource::Selector);
        }
    }
}

mod role_access {
    use super::*;

    #[test]
    fn grant_and_revoke_editor() {
        let mut oracle = deploy();

        assert!(!oracle.is_editor(EDITOR), "should not be editor before grant");

        oracle.grant_editor(ADMIN, EDITOR).unwrap();
        assert!(oracle.is_editor(EDITOR), "should be editor after grant");

        oracle.grant_editor(ADMIN, EDITOR).unwrap();
        assert!(oracle.is_editor(EDITOR), "repeat grant keeps membership");
        assert_eq!(oracle.editors(), vec![EDITOR]);

        oracle.revoke_editor(ADMIN, EDITOR).unwrap();
        assert!(!oracle.is_editor(EDITOR), "should not be editor after revoke");

        oracle.revoke_editor(ADMIN, EDITOR).unwrap();
        assert!(!oracle.is_editor(EDITOR), "repeat revoke is a no-op");
    }

    #[test]
    fn only_admin_updates_default_score() {
        let mut oracle = deploy();
        oracle.grant_editor(ADMIN, EDITOR).unwrap();

        assert_eq!(
            oracle.update_default_score(EDITOR, 60),
            Err(OracleError::Unauthorized {
                caller: EDITOR,
                required: Role::Admin
            })
        );
        assert_eq!(oracle.default_score(), 0);

        assert!(oracle.update_default_score(READER, 60).is_err());
        assert_eq!(oracle.default_score(), 0);

        oracle.update_default_score(ADMIN, 60).unwrap();
        assert_eq!(oracle.default_score(), 60);
        assert_eq!(oracle.get_security_score(contract()), Ok(60));
    }

    #[test]
    fn only_editor_and_admin_push_results() {
        let mut oracle = deploy();
        let sel = selector("0x00000001");

        assert_eq!(
            oracle.push_result(READER, ADMIN, Some(sel), 10, 10),
            Err(OracleError::Unauthorized {
                caller: READER,
                required: Role::Editor
            })
        );
        assert_eq!(oracle.score_entry(ADMIN, Some(sel)), Ok(None));

        oracle.grant_editor(ADMIN, EDITOR).unwrap();
        oracle.push_result(EDITOR, ADMIN, Some(sel), 10, 10).unwrap();
        assert_eq!(oracle.get_security_score_bytes4(ADMIN, sel), Ok(10));

        oracle.push_result(ADMIN, ADMIN, Some(sel), 20, 15).unwrap();
        let entry = oracle.score_entry(ADMIN, Some(sel)).unwrap().unwrap();
        assert_eq!((entry.score, entry.confidence), (20, 15));
    }

    #[test]
    fn revoked_editor_cannot_push() {
        let mut oracle = deploy();
        oracle.grant_editor(ADMIN, EDITOR).unwrap();
        oracle.revoke_editor(ADMIN, EDITOR).unwrap();

        assert!(oracle
            .push_result(EDITOR, contract(), None, 10, 10)
            .is_err());
        assert_eq!(oracle.score_entry(contract(), None), Ok(None));
    }

    #[test]
    fn editors_cannot_manage_editors() {
        let mut oracle = deploy();
        oracle.grant_editor(ADMIN, EDITOR).unwrap();

        assert!(oracle.grant_editor(EDITOR, READER).is_err());
        assert!(!oracle.is_editor(READER));

        assert!(oracle.revoke_editor(EDITOR, EDITOR).is_err());
        assert!(oracle.is_editor(EDITOR));
    }

    #[test]
    fn admin_is_not_reported_as_editor() {
        let oracle = deploy();
        assert!(oracle.is_admin(ADMIN));
        assert!(!oracle.is_editor(ADMIN));
    }
}
