// Verification pipeline benchmarks.
//
// Covers the MiMC message hash on its own, signing a payload, and full
// verification of a withdraw and an NFT purchase, the cheapest and most
// expensive kinds by leg count.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_bigint::BigInt;

use ark_bn254::Fr;
use rollup_txverify::crypto::mimc::hash_elements;
use rollup_txverify::crypto::LedgerKeypair;
use rollup_txverify::ledger::{Account, AccountIndex, LedgerSnapshot, Nft};
use rollup_txverify::transaction::{
    compute_msg_hash, sign_tx, verify_tx, BuyNftTx, GasFee, WithdrawTx,
};

fn keypair(index: AccountIndex) -> LedgerKeypair {
    LedgerKeypair::from_seed(&[index as u8; 32])
}

fn snapshot() -> LedgerSnapshot {
    let mut snapshot = LedgerSnapshot::new();
    for index in 1..=4u64 {
        snapshot = snapshot
            .with_account(Account {
                account_index: index,
                account_name: format!("bench{index}.legend"),
                public_key: keypair(index).public_key().to_hex(),
                nonce: 0,
                collection_nonce: 0,
            })
            .with_balance(index, 0, "1000000")
            .with_balance(index, 1, "1000000");
    }
    snapshot.with_nft(Nft {
        nft_index: 7,
        creator_account_index: 4,
        owner_account_index: 3,
        nft_content_hash: "1b".repeat(32),
        nft_l1_address: "0".to_string(),
        nft_l1_token_id: "0".to_string(),
        creator_treasury_rate: 250,
        collection_id: 0,
        asset_id: 0,
        asset_amount: "5000".to_string(),
    })
}

fn gas() -> GasFee {
    GasFee {
        gas_account_index: 1,
        gas_fee_asset_id: 1,
        gas_fee_asset_amount: BigInt::from(5),
    }
}

fn withdraw() -> WithdrawTx {
    WithdrawTx {
        from_account_index: 2,
        asset_id: 0,
        asset_amount: BigInt::from(100),
        to_address: "11".repeat(20),
        gas: gas(),
        nonce: 0,
        sig: String::new(),
    }
}

fn bench_mimc(c: &mut Criterion) {
    let mut group = c.benchmark_group("mimc/hash_elements");
    for size in [4usize, 8, 12] {
        let elements: Vec<Fr> = (0..size as u64).map(Fr::from).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &elements, |b, elements| {
            b.iter(|| hash_elements(elements));
        });
    }
    group.finish();
}

fn bench_msg_hash(c: &mut Criterion) {
    let tx = withdraw();
    c.bench_function("txverify/msg_hash_withdraw", |b| {
        b.iter(|| compute_msg_hash(&tx).unwrap());
    });
}

fn bench_sign(c: &mut Criterion) {
    let kp = keypair(2);
    c.bench_function("txverify/sign_withdraw", |b| {
        b.iter(|| {
            let mut tx = withdraw();
            sign_tx(&mut tx, &kp).unwrap();
        });
    });
}

fn bench_verify_withdraw(c: &mut Criterion) {
    let snapshot = snapshot();
    let mut tx = withdraw();
    sign_tx(&mut tx, &keypair(2)).unwrap();

    c.bench_function("txverify/verify_withdraw", |b| {
        b.iter(|| verify_tx(&snapshot, &tx).unwrap());
    });
}

fn bench_verify_buy(c: &mut Criterion) {
    let snapshot = snapshot();
    let mut tx = BuyNftTx {
        buyer_account_index: 2,
        owner_account_index: 3,
        creator_account_index: 4,
        nft_index: 7,
        nft_content_hash: "1b".repeat(32),
        asset_id: 0,
        asset_amount: BigInt::from(5_000),
        gas: gas(),
        nonce: 0,
        sig: String::new(),
    };
    sign_tx(&mut tx, &keypair(2)).unwrap();

    c.bench_function("txverify/verify_buy_nft", |b| {
        b.iter(|| verify_tx(&snapshot, &tx).unwrap());
    });
}

criterion_group!(
    benches,
    bench_mimc,
    bench_msg_hash,
    bench_sign,
    bench_verify_withdraw,
    bench_verify_buy,
);
criterion_main!(benches);
