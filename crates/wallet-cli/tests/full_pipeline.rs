//! Cross-crate integration tests exercising the full pipeline:
//! parse arguments -> generate or sign -> render output.
//!
//! These drive `wallet_cli::run` with in-memory consoles, the same entry
//! point the binary uses, to catch regressions at crate boundaries.

use bitcoin::consensus::deserialize;
use bitcoin::{Amount, Transaction};
use chain_bch::address::Address;
use chain_bch::capability::{AddressCodec, BchAddressCodec, P2pkhVerifier, ScriptVerifier};
use chain_bch::keys::{decode_wif, pubkey_hash};
use chain_bch::BchNetwork;
use clap::Parser;
use wallet_cli::cli::WalletCli;
use wallet_cli::output::Console;

const TESTNET_KEY_ONE: &str = "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN87JcbXMTcA";
const RECEIVER: &str = "bchtest:qr6m7j9njldwwzlg9v7v53unlr4jkmx6eymt9qmp0k";
const FUNDING_TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

/// Run the CLI with `argv` and return (stdout, stderr, succeeded).
fn invoke(argv: &[&str]) -> (String, String, bool) {
    let cli = WalletCli::try_parse_from(argv).unwrap();
    let mut console = Console::new(Vec::new(), Vec::new(), false);
    let result = wallet_cli::run(&cli, &mut console);
    if let Err(e) = &result {
        console.error(&format!("{e:#}")).unwrap();
    }
    let (out, err) = console.into_parts();
    (
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
        result.is_ok(),
    )
}

fn field<'a>(stdout: &'a str, label: &str) -> &'a str {
    stdout
        .lines()
        .find_map(|line| line.strip_prefix(&format!("{label}:")))
        .map(str::trim)
        .unwrap()
}

fn spend_argv(value: &str) -> Vec<&str> {
    vec![
        "bch-wallet",
        "spendUnconfirmedUtxo",
        "--privkey",
        TESTNET_KEY_ONE,
        "--to",
        RECEIVER,
        "--hash",
        FUNDING_TXID,
        "--idx",
        "0",
        "--value",
        value,
    ]
}

// ─── newaddress: generate -> render -> decode back ─────────────────

#[test]
fn newaddress_full_pipeline_all_networks() {
    for network in BchNetwork::ALL {
        let name = network.to_string();
        let (stdout, stderr, ok) = invoke(&["bch-wallet", "newaddress", name.as_str()]);
        assert!(ok, "{stderr}");
        assert!(stderr.is_empty());

        // 1. The key round-trips through WIF on the same network
        let wif = field(&stdout, "private key");
        let key = decode_wif(wif, network).unwrap();
        let expected = Address::p2pkh(pubkey_hash(&key), network);

        // 2. Both renderings decode to the key's address
        let legacy = Address::decode(field(&stdout, "base58 encoded address"), network).unwrap();
        let cash = Address::decode(field(&stdout, "cashaddr encoded address"), network).unwrap();
        assert_eq!(legacy, expected);
        assert_eq!(cash, expected);

        // 3. The CashAddr prefix names the network
        assert!(field(&stdout, "cashaddr encoded address")
            .starts_with(network.params().cashaddr_prefix));
    }
}

#[test]
fn newaddress_json_output() {
    let (stdout, _, ok) = invoke(&["bch-wallet", "--json", "newaddress", "MAINNET"]);
    assert!(ok);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["network"], "mainnet");
    assert!(value["legacy_address"].as_str().unwrap().starts_with('1'));
    assert!(value["cash_address"]
        .as_str()
        .unwrap()
        .starts_with("bitcoincash:q"));
    let wif = value["private_key"].as_str().unwrap();
    decode_wif(wif, BchNetwork::Mainnet).unwrap();
}

#[test]
fn newaddress_errors_print_nothing_on_stdout() {
    for argv in [
        vec!["bch-wallet", "newaddress"],
        vec!["bch-wallet", "newaddress", "devnet"],
        vec!["bch-wallet", "newaddress", "mainnet", "testnet"],
    ] {
        let (stdout, stderr, ok) = invoke(&argv);
        assert!(!ok);
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("error: "));
        assert!(stderr.contains("mainnet/testnet/regtest"));
    }
}

// ─── spendUnconfirmedUtxo: parse -> assemble -> sign -> verify ─────

#[test]
fn spend_full_pipeline_testnet() {
    let (stdout, stderr, ok) = invoke(&spend_argv("100000"));
    assert!(ok, "{stderr}");

    // 1. Exactly one line of lowercase hex
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    let raw = hex::decode(lines[0]).unwrap();
    let tx: Transaction = deserialize(&raw).unwrap();

    // 2. Shape and amounts
    assert_eq!(tx.input.len(), 1);
    assert_eq!(tx.output.len(), 1);
    assert_eq!(tx.input[0].previous_output.txid.to_string(), FUNDING_TXID);
    assert_eq!(tx.output[0].value, Amount::from_sat(100_000 - 19));
    let receiver = Address::decode(RECEIVER, BchNetwork::Testnet).unwrap();
    assert_eq!(tx.output[0].script_pubkey, receiver.script_pubkey());

    // 3. The input independently verifies against the sender's script
    let key = decode_wif(TESTNET_KEY_ONE, BchNetwork::Testnet).unwrap();
    let sender = Address::p2pkh(pubkey_hash(&key), BchNetwork::Testnet);
    P2pkhVerifier::default()
        .verify_input(&tx, 0, &sender.script_pubkey(), Amount::from_sat(100_000))
        .unwrap();
}

#[test]
fn spend_json_reports_fee_and_txid() {
    let mut argv = spend_argv("250000");
    argv.insert(1, "--json");
    let (stdout, _, ok) = invoke(&argv);
    assert!(ok);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["fee"], 19);
    assert_eq!(value["output_value"], 250_000 - 19);

    let raw = hex::decode(value["hex"].as_str().unwrap()).unwrap();
    let tx: Transaction = deserialize(&raw).unwrap();
    assert_eq!(value["txid"], tx.compute_txid().to_string());
}

#[test]
fn spend_with_legacy_receiver_matches_cashaddr_receiver() {
    let codec = BchAddressCodec;
    let receiver = codec.decode(RECEIVER, BchNetwork::Testnet).unwrap();
    let legacy = codec.encode_legacy(&receiver);

    let mut argv = spend_argv("100000");
    let to = argv.iter().position(|a| *a == RECEIVER).unwrap();
    argv[to] = legacy.as_str();

    let (via_legacy, _, ok) = invoke(&argv);
    assert!(ok);
    let (via_cashaddr, _, _) = invoke(&spend_argv("100000"));
    assert_eq!(via_legacy, via_cashaddr);
}

#[test]
fn spend_errors_print_nothing_on_stdout() {
    // Fee equals the input value.
    let (stdout, stderr, ok) = invoke(&spend_argv("19"));
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("assemble transaction failed"));

    // Missing value.
    let (stdout, stderr, ok) = invoke(&spend_argv("0"));
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("arguments are not enough"));

    // Key for another network.
    let mut argv = spend_argv("100000");
    argv.extend(["--network", "mainnet"]);
    let (stdout, stderr, ok) = invoke(&argv);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("private key format error"));

    // Malformed transaction hash.
    let mut argv = spend_argv("100000");
    let hash = argv.iter().position(|a| *a == FUNDING_TXID).unwrap();
    argv[hash] = "deadbeef";
    let (stdout, stderr, ok) = invoke(&argv);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("not a valid transaction hash"));

    // Missing private key.
    let mut argv = spend_argv("100000");
    argv.drain(2..4);
    let (stdout, stderr, ok) = invoke(&argv);
    assert!(!ok);
    assert!(stdout.is_empty());
    assert!(stderr.contains("arguments are not enough"));
}
