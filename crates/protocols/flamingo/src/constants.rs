//! Flamingo Constants
//!
//! Fee parameters, contract operation names and the per-network token and
//! pool tables the registry is built from.

/// Fee constants
pub mod fees {
    /// Fee numerator (0.3% fee = 997/1000)
    pub const FEE_NUM: u32 = 997;

    /// Fee denominator
    pub const FEE_DENOM: u32 = 1000;

    /// Decimals shown for the liquidity provider fee
    pub const LP_FEE_DISPLAY_DECIMALS: u32 = 4;

    /// Decimals shown for price impact
    pub const PRICE_IMPACT_DISPLAY_DECIMALS: u32 = 4;
}

/// bNEO to NEO unwrap pricing
pub mod unwrap {
    /// GAS paid per bNEO unwrapped (0.001), as numerator over denominator
    pub const GAS_PER_NEO_NUM: u32 = 1;
    pub const GAS_PER_NEO_DENOM: u32 = 1000;
}

/// Contract operation names
pub mod operations {
    pub const GET_RESERVES: &str = "getReserves";
    pub const SWAP_TOKEN_IN_FOR_TOKEN_OUT: &str = "swapTokenInForTokenOut";
    pub const SWAP_TOKEN_OUT_FOR_TOKEN_IN: &str = "swapTokenOutForTokenIn";
    pub const TRANSFER: &str = "transfer";
}

/// Well-known token symbols
pub mod symbols {
    pub const NEO: &str = "NEO";
    pub const BNEO: &str = "bNEO";
    pub const GAS: &str = "GAS";
}

/// Pools the NEO/bNEO legs touch
pub mod pools {
    /// bNEO charges its wrap/unwrap fee in GAS through this pair
    pub const BNEO_GAS: &str = "FLP-bNEO-GAS";
}

/// Router, factory and pair whitelist hashes
pub mod script_hashes {
    pub const MAINNET_ROUTER: &str = "0xf970f4ccecd765b63732b821775dc38c25d74f23";
    pub const TESTNET_ROUTER: &str = "0x6f0910fa26290f4a423930c8f833395790c71705";
    pub const PAIR_WHITELIST: &str = "0xfb75a5314069b56e136713d38477f647a13991b4";
    pub const FACTORY: &str = "0xca2d20610d7982ebe0bed124ee7e9b2d580a6efc";
}

/// (symbol, name, decimals, hash)
pub type TokenSpec = (&'static str, &'static str, u32, &'static str);

/// (symbol, decimals, hash, token_a, token_b)
pub type PoolSpec = (&'static str, u32, &'static str, &'static str, &'static str);

/// Mainnet tokens, in registry order
pub const MAINNET_TOKENS: &[TokenSpec] = &[
    ("FLM", "FLM", 8, "0xf0151f528127558851b39c2cd8aa47da7418ab28"),
    ("TIPS", "TIPS", 8, "0x340720c7107ef5721e44ed2ea8e314cce5c130fa"),
    ("NEO", "NEO", 0, "0xef4073a0f2b305a38ec4050e4d3d28bc40ea63f5"),
    ("GAS", "GAS", 8, "0xd2a4cff31913016155e38e474a2c06d08be276cf"),
    ("bNEO", "bNEO", 8, "0x48c40d4666f93408be1bef038b6722404d9a4c2a"),
    ("FUSD", "FUSD", 8, "0x1005d400bcc2a56b7352f09e273be3f9933a5fb1"),
    ("LRB", "LRB", 8, "0x8c07b4c9f5bc170a3922eac4f5bb7ef17b0acc8b"),
    ("USDL", "USDL", 8, "0xa8c51aa0c177187aeed3db88bdfa908ccbc9b1a5"),
    ("SOM", "SOM", 8, "0x2d4c6cf0417209a7eb410160344e224e74f87195"),
    ("CANDY", "CANDY", 9, "0x88da18a5bca86ec8206d9b4960a7d0c4355a432f"),
    ("DOGER", "DOGER", 8, "0x322b5a366ca724801a1aa01e669b5f3d7f8c7f6f"),
    ("DOGEF", "DOGEF", 8, "0xa3291b66f70d4687fc0e41977d8acb0699f235ae"),
    ("FDE", "FDE", 8, "0x9770f4d78a19d1a6fa94b472bcedffcc06b56c49"),
    ("fUSDT", "fUSDT", 6, "0xcd48b160c1bbc9d74997b803b9a7ad50a4bef020"),
    ("fWETH", "fWETH", 18, "0xc14b601252aa5dfa6166cf35fe5ccd2e35f3fdf5"),
    ("fWBTC", "fWBTC", 8, "0xd6abe115ecb75e1fa0b42f5e85934ce8c1ae2893"),
    ("pONT", "pONT", 9, "0x8122bc2212ec971690a044b37a6f52a9349b702b"),
    ("pWING", "pWING", 9, "0xeeccd60ed722111f8400434dac3ba42c14d8beb1"),
    ("GM", "GM", 8, "0x9b049f1283515eef1d3f6ac610e1595ed25ca3e9"),
    ("fCAKE", "fCAKE", 18, "0xe65b462b90516012826f8a9c4c285d8c750e3a77"),
    ("SWTH", "SWTH", 8, "0x78e1330db47634afdb5ea455302ba2d12b8d549f"),
    ("fBNB", "fBNB", 18, "0xb56f0fba45cc57a948b342186274dfd863996bb3"),
];

/// Mainnet pools, in registry order
pub const MAINNET_POOLS: &[PoolSpec] = &[
    ("FLP-FLM-bNEO", 8, "0x4d5a85b0c83777df72cfb665a933970e4e20c0ec", "bNEO", "FLM"),
    ("FLP-FLM-fUSDT", 8, "0x59aa80468a120fe79aa5601de07746275c9ed76a", "fUSDT", "FLM"),
    ("FLP-FLM-fWBTC", 8, "0x6bcbf09a7193c968d608178a45785967f0721c42", "fWBTC", "FLM"),
    ("FLP-FLM-fWETH", 8, "0x1404929a660620869c9cb46ff228ee9d7147959d", "fWETH", "FLM"),
    ("FLP-FLM-GAS", 8, "0x171d791c0301c332cfe95c6371ee32965e34b606", "GAS", "FLM"),
    ("FLP-FLM-fBNB", 8, "0x186998775b3dfb81eb878030cb49cc1eeeed5bfc", "fBNB", "FLM"),
    ("FLP-FLM-pONT", 8, "0x1b3f740240af479f07e44ee3ee78df4c6cb4b1fb", "pONT", "FLM"),
    ("FLP-FLM-WING", 8, "0x576f42660a266141f03972f96992f2c1c10253a0", "pWING", "FLM"),
    ("FLP-FLM-GM", 8, "0xf23221a92c29beffbea6e46c681c8380d9794579", "GM", "FLM"),
    ("FLP-FLM-fCAKE", 8, "0x236a6679dc26b5f11fae7c3b30784509216dd4b0", "fCAKE", "FLM"),
    ("FLP-FLM-SWTH", 8, "0xd8788aab4f7d84384f1808f9aaacd5dc4ea94317", "SWTH", "FLM"),
    ("FLP-bNEO-fUSDT", 8, "0x545dee8354823d1bdf4ac524e4092f7405025247", "bNEO", "fUSDT"),
    ("FLP-bNEO-fWBTC", 8, "0xc777a8032c1d9d7b885c7357d4c93e7a39f93942", "bNEO", "fWBTC"),
    ("FLP-bNEO-fWETH", 8, "0xedcbe55b04bcc7dad69cfe243bf3d26dc106a1d4", "bNEO", "fWETH"),
    ("FLP-bNEO-GAS", 8, "0x3244fcadcccff190c329f7b3083e4da2af60fbce", "bNEO", "GAS"),
    ("FLP-bNEO-fBNB", 8, "0xa1cd71d503bc8a7666c015f3e943deb2fc4c37e0", "bNEO", "fBNB"),
    ("FLP-bNEO-pONT", 8, "0x267f98a017f3905ffc996555632c77eae701d1ca", "bNEO", "pONT"),
    ("FLP-bNEO-WING", 8, "0xff3cf71518e7f5a72b3862fa13fe9555c5899930", "bNEO", "pWING"),
    ("FLP-bNEO-GM", 8, "0xc658095f498dd3e00292c29ac1e85fe9ff206f28", "bNEO", "GM"),
    ("FLP-bNEO-fCAKE", 8, "0xf3a258c98f437cc40d2b9f75f87790df8a9ab646", "bNEO", "fCAKE"),
    ("FLP-bNEO-SWTH", 8, "0x48d8b2b02b960aa8845a3f90d2c590d4e61a425c", "bNEO", "SWTH"),
    ("FLP-fWBTC-fUSDT", 8, "0x45d182227b5d753c7f358594b631838b92caf409", "fUSDT", "fWBTC"),
    ("FRP-FLM-FDE", 8, "0x9f193ba476c934dd8847df26684063b2987b7508", "FDE", "FLM"),
    ("FRP-FLM-TIPS", 8, "0x35de27f4d7bc356c9a4b734cabb38cc63657233f", "TIPS", "FLM"),
    ("FRP-FLM-CANDY", 8, "0xf9956798ca7e8274f7ab4f1f6d6c06f55a0a9bd3", "CANDY", "FLM"),
    ("FRP-FLM-DOGEF", 8, "0x5d8545d1780190e1bf7605713c901b197bcfaf11", "DOGEF", "FLM"),
    ("FRP-FLM-DOGER", 8, "0xb3fb4160534d8c366c06d31fc8df7bc2b3428785", "DOGER", "FLM"),
    ("FRP-FLM-SOM", 8, "0x360dc86df056598a492f26baec4db38fcef65477", "SOM", "FLM"),
    ("FRP-bNEO-FDE", 8, "0x77994db5591ff4869d72fa31ffe3ace8d6435e6d", "bNEO", "FDE"),
    ("FRP-bNEO-TIPS", 8, "0x85a2053d65dcbda9208e2a7cfa65a9db09a1cf11", "TIPS", "bNEO"),
    ("FRP-bNEO-CANDY", 8, "0x29ea009d2bfecd5f65994ed54277348fb89d3e44", "bNEO", "CANDY"),
    ("FRP-bNEO-DOGEF", 8, "0xdfe7973be3335a1df558e9509fb4296997364406", "bNEO", "DOGEF"),
    ("FRP-bNEO-DOGER", 8, "0xdfaac72e7051e6cc218a9b77f228f0758f39a990", "DOGER", "bNEO"),
    ("FRP-bNEO-SOM", 8, "0x5faf5e07e2dc09d1315cf6a49699be3feb0377d0", "SOM", "bNEO"),
    ("FRP-FLM-LRB", 8, "0x1f86bab6d548a3bd4e9292be0937c074da78ab77", "LRB", "FLM"),
    ("FRP-FLM-USDL", 8, "0x33a1e91d8187d6f62b5b2c9847b450c90d770b32", "USDL", "FLM"),
    ("FLP-FLM-FUSD", 8, "0xaeae872ace15f87c117213c92c00944af789aed2", "FUSD", "FLM"),
    ("FLP-bNEO-FUSD", 8, "0x3269ece5dc33adf17ed14be7780693f3c8b102d1", "FUSD", "bNEO"),
    ("FLP-fWBTC-FUSD", 8, "0xa71cb8d2ef7de0e97f28378faa401d1133452632", "FUSD", "fWBTC"),
    ("FLP-fUSDT-FUSD", 8, "0x20c0cdd773fe704721669870c7b33b8688aa132c", "FUSD", "fUSDT"),
];

pub const TESTNET_TOKENS: &[TokenSpec] = &[
    ("FLM", "FLM", 8, "0x5b53998b399d10cd25727269e865acc785ef5c1a"),
    ("TIPS", "TIPS", 8, "0xe2cd0c441f37f0daeeee196b5ce23bef4182c43a"),
    ("CANDY", "CANDY", 9, "0x7d4515866a633857c0ca5798aa66856768ae06fe"),
    ("DOGER", "DOGER", 8, "0x7761e3b1939f691feb01d791c4c2307bd195e9e5"),
    ("DOGEF", "DOGEF", 8, "0x1379ebf3c7f42c34bee4c3320d23ce47a8b17ed4"),
    ("NEO", "NEO", 0, "0xef4073a0f2b305a38ec4050e4d3d28bc40ea63f5"),
    ("GAS", "GAS", 8, "0xd2a4cff31913016155e38e474a2c06d08be276cf"),
    ("bNEO", "bNEO", 8, "0x85deac50febfd93988d3f391dea54e8289e43e9e"),
    ("SWTH", "SWTH", 8, "0x70aba30ba83c344fa8c8d65939c93ca12e8c7409"),
    ("GM", "GM", 8, "0xc13b05fc0e6fe3cc681e29a574557784b4f79aff"),
    ("fUSDT", "fUSDT", 6, "0xa2d5f4378c42d118ebc7e1690f9478d3e00aefa1"),
    ("fWETH", "fWETH", 18, "0xe6d9306f944df543bc0171558d06e39fc548ad08"),
    ("fWBTC", "fWBTC", 8, "0x9b9f7db02c0a2d6aa5ad9be7bba843027bf5b5f2"),
    ("pONT", "pONT", 9, "0xdaedcb8316bebd0fd278ec9c85766caba3232cfc"),
    ("pWING", "pWING", 9, "0x44e38f5602b130bc669074c3f938c607448498b2"),
    ("fCAKE", "fCAKE", 18, "0x1667501ddf75e801360d617232c3e9f7958f1962"),
    ("SOM", "SOM", 8, "0xfc7b372524289bc83f97647011698cb3325e8d9d"),
    ("FDE", "FDE", 8, "0x5b769ec16f521711d7246c17ac107f7269bf56da"),
    ("fBNB", "fBNB", 18, "0x1883231a31dc912805cc08a281d4c268c4cac345"),
];

/// Testnet pools. Pairs quoting FUSD are left out: FUSD has no testnet deployment.
pub const TESTNET_POOLS: &[PoolSpec] = &[
    ("FLP-FLM-bNEO", 8, "0x35f47f3f697aaadfec954d5936d67f172413de7e", "FLM", "bNEO"),
    ("FLP-FLM-fUSDT", 8, "0x5510e648a00fea8966025c8b4b1c618cfa363ad1", "FLM", "fUSDT"),
    ("FLP-FLM-fWBTC", 8, "0xd11716dc3fce15790177bd6d4a827e3d00255118", "FLM", "fWBTC"),
    ("FLP-FLM-fWETH", 8, "0xf9ee43c25f23fd42a1d6d199ef87ebe953bec325", "FLM", "fWETH"),
    ("FLP-FLM-GAS", 8, "0x7deb6406aeef3414ae47ae34fd986d0ca2c92859", "FLM", "GAS"),
    ("FLP-FLM-BNB", 8, "0xa89606941d015c1f5a14939198a0bf56399b560e", "fBNB", "FLM"),
    ("FLP-FLM-pONT", 8, "0xfe2984756a526fb1405d69d72676a42a9edf3650", "FLM", "pONT"),
    ("FLP-FLM-WING", 8, "0xe9401a22ee998748012b249cae7fd84006889cf1", "pWING", "FLM"),
    ("FLP-FLM-GM", 8, "0x635d478af99bef6cc53920836ec539e569907c8b", "FLM", "GM"),
    ("FLP-FLM-fCAKE", 8, "0x3f4b2425b704ac587632cab04b8e2db4bcfab911", "fCAKE", "FLM"),
    ("FLP-FLM-SWTH", 8, "0xc7f02273b619ef4b20f81e9ec41becc86f645b3d", "FLM", "SWTH"),
    ("FLP-bNEO-fUSDT", 8, "0x7d835604b4b9e58baabe26f32a43fb977b568fc7", "bNEO", "fUSDT"),
    ("FLP-bNEO-fWBTC", 8, "0x8e71d7dab87a6ad6279d0385096307fe17038282", "bNEO", "fWBTC"),
    ("FLP-bNEO-fWETH", 8, "0xa9cdf0e61bb6d38390b974628e40a10cd22babcf", "bNEO", "fWETH"),
    ("FLP-bNEO-GAS", 8, "0x5a262ceef47ffcb82bfd3d94b916a2573e503e5a", "bNEO", "GAS"),
    ("FLP-bNEO-BNB", 8, "0x1bcd02c98802365aa6722bc552fbdcae4397c17e", "fBNB", "bNEO"),
    ("FLP-bNEO-pONT", 8, "0xcce0827f42ea56cbc9514e4e9e60589dbbc37869", "bNEO", "pONT"),
    ("FLP-bNEO-WING", 8, "0x2ad51e9fef7f52fa60070cf3379a5b9170d76249", "pWING", "bNEO"),
    ("FLP-bNEO-GM", 8, "0xa83cc212789b7ec6c0ccffe109bc71413eefe3e1", "bNEO", "GM"),
    ("FLP-bNEO-fCAKE", 8, "0x3c7ae4f37c9ebf54536f9ce15cfd4359f6ea6ba1", "fCAKE", "bNEO"),
    ("FLP-bNEO-SWTH", 8, "0x13e2a229e27f2aa567ad9fd5a1958a32691d18fc", "SWTH", "bNEO"),
    ("FLP-fWBTC-fUSDT", 8, "0x7d71812d091d564d9604388787a65ec8e4d42a69", "fWBTC", "fUSDT"),
    ("FRP-FLM-FDE", 8, "0x4d30c0ab3d908126133813fb40cb153caf78d17d", "FLM", "FDE"),
    ("FRP-bNEO-FDE", 8, "0xaa4a2c7e9f5ddd2e6bfafc36d4b74e9ee171c6ae", "FDE", "bNEO"),
];
