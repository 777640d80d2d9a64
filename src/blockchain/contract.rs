//! Redeem contract bindings.

use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IGaiaRedeem {
        /// Redeem a server-signed credit voucher.
        function redeem(
            string orderId,
            uint256 amount,
            uint256 timestamp,
            bytes signature
        ) external;
    }
}
