#[cfg(feature = "mock")]
mod mock_tests {
    use form_relay::{FormSubmitter, MockFormSubmitter, ParameterSet, RelayError, Result};
    use mockall::predicate::*; // for eq(), always(), etc.

    #[tokio::test]
    async fn test_mock_submit_form_post() -> Result<()> {
        let mut mock_submitter = MockFormSubmitter::new();
        let params = ParameterSet::from_pairs([("user_id", "42")]);

        mock_submitter
            .expect_submit_form_post()
            .with(eq("https://tool.example.com/launch"), eq(params.clone()))
            .times(1)
            .returning(|_, _| Ok("launched".to_string()));

        let submitter: &dyn FormSubmitter = &mock_submitter;
        let body = submitter
            .submit_form_post("https://tool.example.com/launch", &params)
            .await?;

        assert_eq!(body, "launched");
        Ok(())
    }

    #[tokio::test]
    async fn test_mock_surfaces_failures() {
        let mut mock_submitter = MockFormSubmitter::new();

        mock_submitter
            .expect_submit_form_post()
            .times(1)
            .returning(|_, _| Err(RelayError::Http("connection reset".to_string())));

        let submitter: &dyn FormSubmitter = &mock_submitter;
        let result = submitter
            .submit_form_post("https://tool.example.com/launch", &ParameterSet::new())
            .await;

        assert!(matches!(result, Err(RelayError::Http(_))));
    }

    #[tokio::test]
    async fn test_mock_relay_query() -> Result<()> {
        let mut mock_submitter = MockFormSubmitter::new();

        mock_submitter
            .expect_relay_query()
            .with(eq("https://tool.example.com/launch"), eq("a=1&a=2"))
            .times(1)
            .returning(|_, _| Ok("relayed".to_string()));

        let submitter: &dyn FormSubmitter = &mock_submitter;
        let body = submitter
            .relay_query("https://tool.example.com/launch", "a=1&a=2")
            .await?;

        assert_eq!(body, "relayed");
        Ok(())
    }
}
