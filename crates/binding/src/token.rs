//! ERC20 token contract bindings.

use alloy_sol_types::sol;

sol! {
    /// Standard ERC20 token interface, as deployed by `BasicERC20`.
    #[sol(rpc)]
    interface IERC20 {
        /// Emitted when tokens are transferred, including the constructor mint
        /// (from the zero address)
        event Transfer(
            address indexed from,
            address indexed to,
            uint256 value
        );

        /// Emitted when an allowance is set
        event Approval(
            address indexed owner,
            address indexed spender,
            uint256 value
        );

        /// Get token name
        function name() external view returns (string memory);

        /// Get token symbol
        function symbol() external view returns (string memory);

        /// Get token decimals
        function decimals() external view returns (uint8);

        /// Get total supply
        function totalSupply() external view returns (uint256);

        /// Get token balance of an account
        function balanceOf(address account) external view returns (uint256);

        /// Get allowance granted by owner to spender
        function allowance(address owner, address spender) external view returns (uint256);

        /// Transfer tokens to recipient
        function transfer(address to, uint256 amount) external returns (bool);

        /// Set spender's allowance to exactly `amount`
        function approve(address spender, uint256 amount) external returns (bool);

        /// Transfer tokens from owner to recipient (requires allowance)
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};
    use alloy_sol_types::{SolCall, SolEvent};

    #[test]
    fn test_selectors_match_standard() {
        assert_eq!(IERC20::transferCall::SELECTOR, [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(IERC20::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(IERC20::transferFromCall::SELECTOR, [0x23, 0xb8, 0x72, 0xdd]);
        assert_eq!(IERC20::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_transfer_event_signature() {
        assert_eq!(
            IERC20::Transfer::SIGNATURE,
            "Transfer(address,address,uint256)"
        );
        assert_eq!(
            IERC20::Approval::SIGNATURE,
            "Approval(address,address,uint256)"
        );
    }

    #[test]
    fn test_transfer_calldata_layout() {
        let call = IERC20::transferCall {
            to: address!("2222222222222222222222222222222222222222"),
            amount: U256::from(100),
        };
        let data = call.abi_encode();
        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(&data[..4], &IERC20::transferCall::SELECTOR);
        assert_eq!(data[67], 100);
    }
}
